use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed caller input: out-of-range numbers, unusable passwords,
    /// page indices outside the buffer window.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Misuse of the object graph: double finalize, writes after finalize,
    /// handles from another document, calls after the document closed.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Invalid object reference: {0} {1} R")]
    InvalidObjectReference(u32, u16),

    #[error("Compression error: {0}")]
    CompressionError(String),

    #[error("Encryption error: {0}")]
    EncryptionError(String),
}

impl PdfError {
    /// True for errors caused by caller input rather than the sink or the engine.
    pub fn is_validation(&self) -> bool {
        matches!(self, PdfError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;
