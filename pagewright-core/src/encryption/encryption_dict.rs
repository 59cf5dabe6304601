//! Encryption dictionary (`/Encrypt`) for the standard security handler.

use crate::encryption::Permissions;
use crate::objects::{Dictionary, Object};

/// Crypt filter method used by the `/StdCF` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptFilterMethod {
    /// AES-128 CBC
    AesV2,
    /// AES-256 CBC
    AesV3,
}

impl CryptFilterMethod {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            CryptFilterMethod::AesV2 => "AESV2",
            CryptFilterMethod::AesV3 => "AESV3",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncryptionDictionary {
    pub v: u8,
    pub r: u8,
    /// Key length in bits, written for V >= 2.
    pub key_bits: usize,
    /// Present for V >= 4.
    pub crypt_filter: Option<CryptFilterMethod>,
    pub o: Vec<u8>,
    pub u: Vec<u8>,
    pub oe: Option<Vec<u8>>,
    pub ue: Option<Vec<u8>>,
    pub p: Permissions,
    pub perms: Option<Vec<u8>>,
}

impl EncryptionDictionary {
    pub fn to_dict(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.set("Filter", Object::name("Standard"));
        dict.set("V", Object::Integer(self.v as i64));
        if self.v >= 2 {
            dict.set("Length", Object::Integer(self.key_bits as i64));
        }
        if let Some(method) = self.crypt_filter {
            let mut std_cf = Dictionary::new();
            std_cf.set("AuthEvent", Object::name("DocOpen"));
            std_cf.set("CFM", Object::name(method.pdf_name()));
            std_cf.set("Length", Object::Integer((self.key_bits / 8) as i64));

            let mut filters = Dictionary::new();
            filters.set("StdCF", std_cf);
            dict.set("CF", filters);
            dict.set("StmF", Object::name("StdCF"));
            dict.set("StrF", Object::name("StdCF"));
        }
        dict.set("R", Object::Integer(self.r as i64));
        dict.set("O", Object::ByteString(self.o.clone()));
        if let Some(oe) = &self.oe {
            dict.set("OE", Object::ByteString(oe.clone()));
        }
        dict.set("U", Object::ByteString(self.u.clone()));
        if let Some(ue) = &self.ue {
            dict.set("UE", Object::ByteString(ue.clone()));
        }
        dict.set("P", Object::Integer(self.p.p_value() as i64));
        if let Some(perms) = &self.perms {
            dict.set("Perms", Object::ByteString(perms.clone()));
        }
        dict
    }
}
