//! Standard security handler (ISO 32000-1 Section 7.6.3, Adobe extension
//! level 3 for revision 5).
//!
//! | format version | V | R | key bits | cipher      |
//! |----------------|---|---|----------|-------------|
//! | 1.3 (default)  | 1 | 2 | 40       | RC4         |
//! | 1.4, 1.5       | 2 | 3 | 128      | RC4         |
//! | 1.6, 1.7       | 4 | 4 | 128      | AES-128-CBC |
//! | 1.7ext3        | 5 | 5 | 256      | AES-256-CBC |

use crate::encryption::aes;
use crate::encryption::rc4::rc4;
use crate::encryption::saslprep::saslprep;
use crate::encryption::{
    CryptFilterMethod, EncryptionDictionary, ObjectCipher, PermissionFlags, Permissions,
};
use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, ObjectId};
use crate::version::PdfVersion;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Password padding string (Algorithm 2, step a).
pub const PADDING: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01, 0x08,
    0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53, 0x69, 0x7A,
];

const AES_SALT: &[u8; 4] = b"sAlT";
const R5_PASSWORD_LIMIT: usize = 127;

/// Security handler generation, chosen from the requested format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityVersion {
    V1,
    V2,
    V4,
    V5,
}

impl SecurityVersion {
    pub fn for_pdf_version(version: PdfVersion) -> Self {
        match version {
            PdfVersion::V1_3 => SecurityVersion::V1,
            PdfVersion::V1_4 | PdfVersion::V1_5 => SecurityVersion::V2,
            PdfVersion::V1_6 | PdfVersion::V1_7 => SecurityVersion::V4,
            PdfVersion::V1_7Ext3 => SecurityVersion::V5,
        }
    }

    /// `/V` entry.
    pub fn v(&self) -> u8 {
        match self {
            SecurityVersion::V1 => 1,
            SecurityVersion::V2 => 2,
            SecurityVersion::V4 => 4,
            SecurityVersion::V5 => 5,
        }
    }

    /// `/R` entry.
    pub fn revision(&self) -> u8 {
        match self {
            SecurityVersion::V1 => 2,
            SecurityVersion::V2 => 3,
            SecurityVersion::V4 => 4,
            SecurityVersion::V5 => 5,
        }
    }

    pub fn key_bits(&self) -> usize {
        match self {
            SecurityVersion::V1 => 40,
            SecurityVersion::V2 | SecurityVersion::V4 => 128,
            SecurityVersion::V5 => 256,
        }
    }

    pub fn key_len(&self) -> usize {
        self.key_bits() / 8
    }
}

fn md5(data: &[u8]) -> [u8; 16] {
    md5::compute(data).0
}

fn sha256(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

/// Pads or truncates a revision 2-4 password to 32 bytes. Every character
/// must fit in a single byte.
pub fn pad_password(password: &str) -> Result<[u8; 32]> {
    let mut bytes = Vec::with_capacity(32);
    for c in password.chars() {
        let code = c as u32;
        if code > 0xFF {
            return Err(PdfError::Validation(format!(
                "password character U+{code:04X} is outside the single-byte range"
            )));
        }
        bytes.push(code as u8);
    }

    let len = bytes.len().min(32);
    let mut padded = [0u8; 32];
    padded[..len].copy_from_slice(&bytes[..len]);
    padded[len..].copy_from_slice(&PADDING[..32 - len]);
    Ok(padded)
}

/// SASLprep, UTF-8, truncated to 127 bytes.
pub fn prepare_password_r5(password: &str) -> Result<Vec<u8>> {
    let mut bytes = saslprep(password)?.into_bytes();
    bytes.truncate(R5_PASSWORD_LIMIT);
    Ok(bytes)
}

/// RC4 over `data` `rounds` times, pass `i` keyed by `key` XOR `i`.
fn rc4_cascade(key: &[u8], data: &[u8], rounds: u8) -> Result<Vec<u8>> {
    let mut out = data.to_vec();
    let mut round_key = vec![0u8; key.len()];
    for i in 0..rounds {
        for (dst, src) in round_key.iter_mut().zip(key) {
            *dst = src ^ i;
        }
        out = rc4(&round_key, &out)?;
    }
    Ok(out)
}

fn cascade_rounds(revision: u8) -> u8 {
    if revision >= 3 {
        20
    } else {
        1
    }
}

/// `/O` entry for revisions 2-4 (Algorithm 3).
pub fn compute_owner_entry(
    revision: u8,
    key_len: usize,
    padded_user: &[u8; 32],
    padded_owner: &[u8; 32],
) -> Result<Vec<u8>> {
    let mut digest = md5(padded_owner);
    if revision >= 3 {
        for _ in 0..50 {
            digest = md5(&digest);
        }
    }
    rc4_cascade(&digest[..key_len], padded_user, cascade_rounds(revision))
}

/// File encryption key for revisions 2-4 (Algorithm 2).
pub fn compute_file_key(
    revision: u8,
    key_len: usize,
    padded_user: &[u8; 32],
    owner_entry: &[u8],
    permissions: Permissions,
    file_id: &[u8],
) -> Vec<u8> {
    let mut input = Vec::with_capacity(32 + owner_entry.len() + 4 + file_id.len());
    input.extend_from_slice(padded_user);
    input.extend_from_slice(owner_entry);
    input.extend_from_slice(&permissions.to_le_bytes());
    input.extend_from_slice(file_id);

    let mut key = md5(&input)[..key_len].to_vec();
    if revision >= 3 {
        for _ in 0..50 {
            key = md5(&key)[..key_len].to_vec();
        }
    }
    key
}

/// `/U` entry for revisions 2-4 (Algorithms 4 and 5).
pub fn compute_user_entry(revision: u8, file_key: &[u8], file_id: &[u8]) -> Result<Vec<u8>> {
    if revision == 2 {
        return rc4(file_key, &PADDING);
    }
    let mut input = PADDING.to_vec();
    input.extend_from_slice(file_id);
    let mut entry = rc4_cascade(file_key, &md5(&input), 20)?;
    entry.extend_from_slice(&[0u8; 16]);
    Ok(entry)
}

/// Per-object key for revisions 2-4 (Algorithm 1).
pub fn compute_object_key(file_key: &[u8], id: ObjectId, aes: bool) -> Vec<u8> {
    let mut input = Vec::with_capacity(file_key.len() + 9);
    input.extend_from_slice(file_key);
    input.extend_from_slice(&id.number().to_le_bytes()[..3]);
    input.extend_from_slice(&id.generation().to_le_bytes());
    if aes {
        input.extend_from_slice(AES_SALT);
    }
    let len = (file_key.len() + 5).min(16);
    md5(&input)[..len].to_vec()
}

/// Revision 5 `/U`: hash, validation salt, key salt.
pub fn compute_user_entry_r5(password: &[u8], validation_salt: &[u8; 8], key_salt: &[u8; 8]) -> Vec<u8> {
    let mut entry = sha256(&[password, validation_salt]);
    entry.extend_from_slice(validation_salt);
    entry.extend_from_slice(key_salt);
    entry
}

/// Revision 5 `/UE`: the file key wrapped under `SHA-256(password ‖ key salt)`.
pub fn compute_user_key_entry_r5(password: &[u8], key_salt: &[u8], file_key: &[u8]) -> Result<Vec<u8>> {
    let key = sha256(&[password, key_salt]);
    aes::cbc_encrypt_no_padding(&key, &[0u8; aes::BLOCK_SIZE], file_key)
}

/// Revision 5 `/O`, which also hashes the whole `/U` entry.
pub fn compute_owner_entry_r5(
    password: &[u8],
    validation_salt: &[u8; 8],
    key_salt: &[u8; 8],
    user_entry: &[u8],
) -> Vec<u8> {
    let mut entry = sha256(&[password, validation_salt, user_entry]);
    entry.extend_from_slice(validation_salt);
    entry.extend_from_slice(key_salt);
    entry
}

/// Revision 5 `/OE`.
pub fn compute_owner_key_entry_r5(
    password: &[u8],
    key_salt: &[u8],
    user_entry: &[u8],
    file_key: &[u8],
) -> Result<Vec<u8>> {
    let key = sha256(&[password, key_salt, user_entry]);
    aes::cbc_encrypt_no_padding(&key, &[0u8; aes::BLOCK_SIZE], file_key)
}

/// Revision 5 `/Perms`: P, four 0xFF bytes, `Tadb`, four random bytes.
pub fn compute_perms_r5(permissions: Permissions, file_key: &[u8], random: [u8; 4]) -> Result<Vec<u8>> {
    let mut block = [0u8; aes::BLOCK_SIZE];
    block[..4].copy_from_slice(&permissions.to_le_bytes());
    block[4..8].copy_from_slice(&[0xFF; 4]);
    block[8..12].copy_from_slice(b"Tadb");
    block[12..].copy_from_slice(&random);
    Ok(aes::ecb_encrypt_block(file_key, &block)?.to_vec())
}

fn random_array<const N: usize, R: RngCore + ?Sized>(rng: &mut R) -> [u8; N] {
    let mut bytes = [0u8; N];
    rng.fill_bytes(&mut bytes);
    bytes
}

/// Document-wide security state. Immutable once created; hands out a
/// [`ObjectCipher`] per object id.
#[derive(Debug, Clone)]
pub struct StandardSecurityHandler {
    version: SecurityVersion,
    file_key: Vec<u8>,
    permissions: Permissions,
    encryption_dict: EncryptionDictionary,
}

impl StandardSecurityHandler {
    /// Returns `None` when neither password is given. Empty passwords count
    /// as absent. A missing owner password falls back to the user password.
    pub fn create(
        owner_password: Option<&str>,
        user_password: Option<&str>,
        permissions: &PermissionFlags,
        pdf_version: PdfVersion,
        file_id: &[u8],
    ) -> Result<Option<Self>> {
        Self::create_with_rng(
            owner_password,
            user_password,
            permissions,
            pdf_version,
            file_id,
            &mut OsRng,
        )
    }

    /// [`StandardSecurityHandler::create`] with an explicit random source for
    /// the revision 5 key material.
    pub fn create_with_rng<R: RngCore + CryptoRng + ?Sized>(
        owner_password: Option<&str>,
        user_password: Option<&str>,
        permissions: &PermissionFlags,
        pdf_version: PdfVersion,
        file_id: &[u8],
        rng: &mut R,
    ) -> Result<Option<Self>> {
        let owner = owner_password.filter(|p| !p.is_empty());
        let user = user_password.filter(|p| !p.is_empty());
        if owner.is_none() && user.is_none() {
            return Ok(None);
        }

        let version = SecurityVersion::for_pdf_version(pdf_version);
        let handler = match version {
            SecurityVersion::V5 => Self::setup_v5(owner, user.unwrap_or(""), permissions, rng)?,
            _ => Self::setup_rc4_md5(version, owner, user.unwrap_or(""), permissions, file_id)?,
        };
        debug!(
            v = version.v(),
            r = version.revision(),
            key_bits = version.key_bits(),
            "standard security handler ready"
        );
        Ok(Some(handler))
    }

    fn setup_rc4_md5(
        version: SecurityVersion,
        owner: Option<&str>,
        user: &str,
        flags: &PermissionFlags,
        file_id: &[u8],
    ) -> Result<Self> {
        let revision = version.revision();
        let key_len = version.key_len();
        let permissions = Permissions::for_revision(revision, flags);

        let padded_user = pad_password(user)?;
        let padded_owner = match owner {
            Some(password) => pad_password(password)?,
            None => padded_user,
        };

        let o = compute_owner_entry(revision, key_len, &padded_user, &padded_owner)?;
        let file_key = compute_file_key(revision, key_len, &padded_user, &o, permissions, file_id);
        let u = compute_user_entry(revision, &file_key, file_id)?;

        let crypt_filter = (version == SecurityVersion::V4).then_some(CryptFilterMethod::AesV2);
        Ok(Self {
            version,
            file_key,
            permissions,
            encryption_dict: EncryptionDictionary {
                v: version.v(),
                r: revision,
                key_bits: version.key_bits(),
                crypt_filter,
                o,
                u,
                oe: None,
                ue: None,
                p: permissions,
                perms: None,
            },
        })
    }

    fn setup_v5<R: RngCore + CryptoRng + ?Sized>(
        owner: Option<&str>,
        user: &str,
        flags: &PermissionFlags,
        rng: &mut R,
    ) -> Result<Self> {
        let version = SecurityVersion::V5;
        let permissions = Permissions::revision3(flags);

        let user_password = prepare_password_r5(user)?;
        let owner_password = match owner {
            Some(password) => prepare_password_r5(password)?,
            None => user_password.clone(),
        };

        let file_key: [u8; 32] = random_array(rng);

        let user_validation_salt: [u8; 8] = random_array(rng);
        let user_key_salt: [u8; 8] = random_array(rng);
        let u = compute_user_entry_r5(&user_password, &user_validation_salt, &user_key_salt);
        let ue = compute_user_key_entry_r5(&user_password, &user_key_salt, &file_key)?;

        let owner_validation_salt: [u8; 8] = random_array(rng);
        let owner_key_salt: [u8; 8] = random_array(rng);
        let o = compute_owner_entry_r5(&owner_password, &owner_validation_salt, &owner_key_salt, &u);
        let oe = compute_owner_key_entry_r5(&owner_password, &owner_key_salt, &u, &file_key)?;

        let perms = compute_perms_r5(permissions, &file_key, random_array(rng))?;

        Ok(Self {
            version,
            file_key: file_key.to_vec(),
            permissions,
            encryption_dict: EncryptionDictionary {
                v: version.v(),
                r: version.revision(),
                key_bits: version.key_bits(),
                crypt_filter: Some(CryptFilterMethod::AesV3),
                o,
                u,
                oe: Some(oe),
                ue: Some(ue),
                p: permissions,
                perms: Some(perms),
            },
        })
    }

    pub fn version(&self) -> SecurityVersion {
        self.version
    }

    pub fn revision(&self) -> u8 {
        self.version.revision()
    }

    pub fn key_bits(&self) -> usize {
        self.version.key_bits()
    }

    pub fn file_key(&self) -> &[u8] {
        &self.file_key
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn encryption_dictionary(&self) -> &EncryptionDictionary {
        &self.encryption_dict
    }

    /// The `/Encrypt` dictionary body.
    pub fn to_dict(&self) -> Dictionary {
        self.encryption_dict.to_dict()
    }

    /// Byte transform for strings and streams of object `id`.
    pub fn object_cipher(&self, id: ObjectId) -> ObjectCipher {
        match self.version {
            SecurityVersion::V1 | SecurityVersion::V2 => ObjectCipher::Rc4 {
                key: compute_object_key(&self.file_key, id, false),
            },
            SecurityVersion::V4 => ObjectCipher::Aes {
                key: compute_object_key(&self.file_key, id, true),
            },
            SecurityVersion::V5 => ObjectCipher::Aes {
                key: self.file_key.clone(),
            },
        }
    }
}
