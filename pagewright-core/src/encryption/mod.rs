//! Standard security handler: password processing, key derivation and the
//! per-object RC4/AES transforms (ISO 32000-1 Section 7.6).

pub mod aes;
mod encryption_dict;
mod object_cipher;
mod permissions;
pub mod rc4;
mod saslprep;
mod standard_security;

pub use encryption_dict::{CryptFilterMethod, EncryptionDictionary};
pub use object_cipher::ObjectCipher;
pub use permissions::{PermissionFlags, Permissions, Printing};
pub use saslprep::saslprep;
pub use standard_security::{
    compute_file_key, compute_object_key, compute_owner_entry, compute_user_entry, pad_password,
    prepare_password_r5, SecurityVersion, StandardSecurityHandler, PADDING,
};
