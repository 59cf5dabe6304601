//! Output format version. Besides the file header it selects the security
//! handler generation used when passwords are given.

use crate::error::{PdfError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PdfVersion {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "1.3"))]
    V1_3,
    #[cfg_attr(feature = "serde", serde(rename = "1.4"))]
    V1_4,
    #[cfg_attr(feature = "serde", serde(rename = "1.5"))]
    V1_5,
    #[cfg_attr(feature = "serde", serde(rename = "1.6"))]
    V1_6,
    #[cfg_attr(feature = "serde", serde(rename = "1.7"))]
    V1_7,
    /// PDF 1.7 with Adobe extension level 3 (AES-256).
    #[cfg_attr(feature = "serde", serde(rename = "1.7ext3"))]
    V1_7Ext3,
}

impl PdfVersion {
    /// Version written after `%PDF-`.
    pub fn header(&self) -> &'static str {
        match self {
            PdfVersion::V1_3 => "1.3",
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_5 => "1.5",
            PdfVersion::V1_6 => "1.6",
            PdfVersion::V1_7 | PdfVersion::V1_7Ext3 => "1.7",
        }
    }
}

impl fmt::Display for PdfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfVersion::V1_7Ext3 => f.write_str("1.7ext3"),
            other => f.write_str(other.header()),
        }
    }
}

impl FromStr for PdfVersion {
    type Err = PdfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1.3" => Ok(PdfVersion::V1_3),
            "1.4" => Ok(PdfVersion::V1_4),
            "1.5" => Ok(PdfVersion::V1_5),
            "1.6" => Ok(PdfVersion::V1_6),
            "1.7" => Ok(PdfVersion::V1_7),
            "1.7ext3" => Ok(PdfVersion::V1_7Ext3),
            other => Err(PdfError::Validation(format!(
                "unsupported PDF version '{other}'"
            ))),
        }
    }
}
