//! AES helpers over the `aes` and `cbc` crates.
//!
//! Object streams and strings use CBC with PKCS#7 padding. The revision 5
//! key entries (`UE`, `OE`) use CBC without padding and a zero IV, and
//! `Perms` is a single ECB block.

use crate::error::{PdfError, Result};
use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecrypt, BlockDecryptMut, BlockEncrypt, BlockEncryptMut, KeyInit, KeyIvInit};
use aes::{Aes128, Aes256};
use rand::RngCore;

pub const BLOCK_SIZE: usize = 16;

fn key_length_error(len: usize) -> PdfError {
    PdfError::EncryptionError(format!("AES key must be 16 or 32 bytes, got {len}"))
}

fn cbc_encrypt_blocks(key: &[u8], iv: &[u8; BLOCK_SIZE], buf: &mut [u8]) -> Result<()> {
    let len = buf.len();
    let res = match key.len() {
        16 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| key_length_error(key.len()))?
            .encrypt_padded_mut::<NoPadding>(buf, len)
            .map(|_| ()),
        32 => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| key_length_error(key.len()))?
            .encrypt_padded_mut::<NoPadding>(buf, len)
            .map(|_| ()),
        n => return Err(key_length_error(n)),
    };
    res.map_err(|_| PdfError::EncryptionError("input is not block aligned".to_string()))
}

fn cbc_decrypt_blocks(key: &[u8], iv: &[u8; BLOCK_SIZE], buf: &mut [u8]) -> Result<()> {
    let res = match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)
            .map_err(|_| key_length_error(key.len()))?
            .decrypt_padded_mut::<NoPadding>(buf)
            .map(|_| ()),
        32 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)
            .map_err(|_| key_length_error(key.len()))?
            .decrypt_padded_mut::<NoPadding>(buf)
            .map(|_| ()),
        n => return Err(key_length_error(n)),
    };
    res.map_err(|_| PdfError::EncryptionError("input is not block aligned".to_string()))
}

/// CBC with PKCS#7 padding. The output does not include the IV.
pub fn cbc_encrypt(key: &[u8], iv: &[u8; BLOCK_SIZE], data: &[u8]) -> Result<Vec<u8>> {
    let pad = BLOCK_SIZE - data.len() % BLOCK_SIZE;
    let mut buf = Vec::with_capacity(data.len() + pad);
    buf.extend_from_slice(data);
    buf.resize(data.len() + pad, pad as u8);
    cbc_encrypt_blocks(key, iv, &mut buf)?;
    Ok(buf)
}

/// CBC without padding; `data` must be block aligned.
pub fn cbc_encrypt_no_padding(key: &[u8], iv: &[u8; BLOCK_SIZE], data: &[u8]) -> Result<Vec<u8>> {
    let mut buf = data.to_vec();
    cbc_encrypt_blocks(key, iv, &mut buf)?;
    Ok(buf)
}

/// Inverse of [`cbc_encrypt`]; strips and checks the PKCS#7 padding.
pub fn cbc_decrypt(key: &[u8], iv: &[u8; BLOCK_SIZE], data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() || data.len() % BLOCK_SIZE != 0 {
        return Err(PdfError::EncryptionError(format!(
            "ciphertext length {} is not a positive multiple of {BLOCK_SIZE}",
            data.len()
        )));
    }
    let mut buf = data.to_vec();
    cbc_decrypt_blocks(key, iv, &mut buf)?;

    let pad = buf[buf.len() - 1] as usize;
    if pad == 0 || pad > BLOCK_SIZE || buf[buf.len() - pad..].iter().any(|&b| b as usize != pad) {
        return Err(PdfError::EncryptionError("invalid PKCS#7 padding".to_string()));
    }
    buf.truncate(buf.len() - pad);
    Ok(buf)
}

/// Inverse of [`cbc_encrypt_no_padding`].
pub fn cbc_decrypt_no_padding(key: &[u8], iv: &[u8; BLOCK_SIZE], data: &[u8]) -> Result<Vec<u8>> {
    let mut buf = data.to_vec();
    cbc_decrypt_blocks(key, iv, &mut buf)?;
    Ok(buf)
}

/// Encrypts a single block with AES-256 in ECB mode.
pub fn ecb_encrypt_block(key: &[u8], block: &[u8; BLOCK_SIZE]) -> Result<[u8; BLOCK_SIZE]> {
    let cipher = Aes256::new_from_slice(key).map_err(|_| key_length_error(key.len()))?;
    let mut out = aes::Block::clone_from_slice(block);
    cipher.encrypt_block(&mut out);
    let mut bytes = [0u8; BLOCK_SIZE];
    bytes.copy_from_slice(&out);
    Ok(bytes)
}

/// Inverse of [`ecb_encrypt_block`].
pub fn ecb_decrypt_block(key: &[u8], block: &[u8; BLOCK_SIZE]) -> Result<[u8; BLOCK_SIZE]> {
    let cipher = Aes256::new_from_slice(key).map_err(|_| key_length_error(key.len()))?;
    let mut out = aes::Block::clone_from_slice(block);
    cipher.decrypt_block(&mut out);
    let mut bytes = [0u8; BLOCK_SIZE];
    bytes.copy_from_slice(&out);
    Ok(bytes)
}

/// Draws a fresh initialization vector.
pub fn generate_iv<R: RngCore + ?Sized>(rng: &mut R) -> [u8; BLOCK_SIZE] {
    let mut iv = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut iv);
    iv
}
