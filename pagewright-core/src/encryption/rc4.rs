//! RC4 stream cipher, used by security handler revisions 2 and 3.

use crate::error::{PdfError, Result};

/// RC4 cipher state. Encryption and decryption are the same operation.
pub struct Rc4 {
    s: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    /// Runs the key schedule. Fails on an empty key.
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(PdfError::EncryptionError("RC4 key is empty".to_string()));
        }

        let mut s = [0u8; 256];
        for (i, byte) in s.iter_mut().enumerate() {
            *byte = i as u8;
        }

        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }

        Ok(Self { s, i: 0, j: 0 })
    }

    /// XORs the keystream into `data`.
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            self.i = self.i.wrapping_add(1);
            self.j = self.j.wrapping_add(self.s[self.i as usize]);
            self.s.swap(self.i as usize, self.j as usize);
            let k = self.s[self.s[self.i as usize].wrapping_add(self.s[self.j as usize]) as usize];
            *byte ^= k;
        }
    }
}

/// One-shot RC4 over `data` with a fresh key schedule.
pub fn rc4(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut cipher = Rc4::new(key)?;
    let mut out = data.to_vec();
    cipher.apply_keystream(&mut out);
    Ok(out)
}
