//! Flate compression for content streams.

use crate::error::{PdfError, Result};

/// Whether the crate was built with Flate support.
pub const fn is_available() -> bool {
    cfg!(feature = "compression")
}

/// Deflates `data` into a zlib stream (`/FlateDecode`).
#[cfg(feature = "compression")]
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2 + 16), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| PdfError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| PdfError::CompressionError(e.to_string()))
}

#[cfg(not(feature = "compression"))]
pub fn compress(_data: &[u8]) -> Result<Vec<u8>> {
    Err(PdfError::CompressionError(
        "built without the `compression` feature".to_string(),
    ))
}

/// Inflates a zlib stream.
#[cfg(feature = "compression")]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| PdfError::CompressionError(e.to_string()))?;
    Ok(decompressed)
}

#[cfg(not(feature = "compression"))]
pub fn decompress(_data: &[u8]) -> Result<Vec<u8>> {
    Err(PdfError::CompressionError(
        "built without the `compression` feature".to_string(),
    ))
}

#[cfg(all(test, feature = "compression"))]
mod tests {
    use super::*;

    #[test]
    fn test_compress_decompress_roundtrip() {
        let content = b"BT /F1 24 Tf 72 720 Td (Hello) Tj ET\n".repeat(20);

        let compressed = compress(&content).unwrap();
        assert!(compressed.len() < content.len());
        assert_eq!(compressed[0], 0x78, "zlib header");
        assert_eq!(decompress(&compressed).unwrap(), content);
    }

    #[test]
    fn test_compress_empty() {
        let compressed = compress(b"").unwrap();
        assert!(!compressed.is_empty());
        assert_eq!(decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_decompress_garbage_is_an_error() {
        let err = decompress(b"not zlib at all").unwrap_err();
        assert!(matches!(err, PdfError::CompressionError(_)));
        assert!(is_available());
    }
}
