//! Per-object string and stream encryption.

use crate::encryption::aes;
use crate::encryption::rc4::rc4;
use crate::error::{PdfError, Result};
use rand::rngs::OsRng;
use rand::RngCore;

/// Encryption transform bound to one object's key.
///
/// AES output is `IV ‖ ciphertext` with a fresh IV drawn on every call, so
/// two encryptions of the same plaintext differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectCipher {
    Rc4 { key: Vec<u8> },
    Aes { key: Vec<u8> },
}

impl ObjectCipher {
    pub fn key(&self) -> &[u8] {
        match self {
            ObjectCipher::Rc4 { key } | ObjectCipher::Aes { key } => key,
        }
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_with_rng(data, &mut OsRng)
    }

    pub fn encrypt_with_rng<R: RngCore + ?Sized>(&self, data: &[u8], rng: &mut R) -> Result<Vec<u8>> {
        match self {
            ObjectCipher::Rc4 { key } => rc4(key, data),
            ObjectCipher::Aes { key } => {
                let iv = aes::generate_iv(rng);
                let ciphertext = aes::cbc_encrypt(key, &iv, data)?;
                let mut out = Vec::with_capacity(aes::BLOCK_SIZE + ciphertext.len());
                out.extend_from_slice(&iv);
                out.extend_from_slice(&ciphertext);
                Ok(out)
            }
        }
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            ObjectCipher::Rc4 { key } => rc4(key, data),
            ObjectCipher::Aes { key } => {
                if data.len() < aes::BLOCK_SIZE {
                    return Err(PdfError::EncryptionError(
                        "ciphertext is shorter than the IV".to_string(),
                    ));
                }
                let (iv, body) = data.split_at(aes::BLOCK_SIZE);
                let mut iv_block = [0u8; aes::BLOCK_SIZE];
                iv_block.copy_from_slice(iv);
                aes::cbc_decrypt(key, &iv_block, body)
            }
        }
    }
}
