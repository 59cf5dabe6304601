//! # pagewright
//!
//! A streaming PDF writer. Objects go to the output the moment they are
//! finished, so memory stays bounded by what is still open rather than by
//! the size of the document.
//!
//! ## Features
//!
//! - **Object graph**: forward and cyclic references between indirect objects
//! - **Single pass**: output is append-only, offsets are read off the cursor
//! - **Late objects**: the trailer waits until every allocated object is finalized
//! - **Encryption**: standard security handler, RC4 40/128-bit, AES-128 and AES-256
//! - **Compression**: Flate streams behind the default `compression` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use pagewright::{Destination, Document, DocumentOptions, PageOptions, Result};
//!
//! # fn main() -> Result<()> {
//! let options = DocumentOptions::default()
//!     .with_page(PageOptions::a4())
//!     .with_title("Hello");
//! let mut doc = Document::new(Vec::new(), options)?;
//!
//! doc.add_content("BT /F1 24 Tf 72 720 Td (Hello, PDF!) Tj ET")?;
//! doc.add_named_destination("top", Destination::xyz(0.0, 0.0, None))?;
//!
//! doc.add_page()?;
//! doc.add_content("0 0 m 100 100 l S")?;
//!
//! doc.end()?;
//! let pdf = doc.into_inner()?;
//! assert!(pdf.ends_with(b"%%EOF\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Objects finished after `end()`
//!
//! ```rust
//! use pagewright::{Dictionary, Document, DocumentOptions, DocumentState, Object};
//!
//! # fn main() -> pagewright::Result<()> {
//! let mut doc = Document::new(Vec::new(), DocumentOptions::default())?;
//! let mut font = Dictionary::new();
//! font.set("Type", Object::name("Font"));
//! let font = doc.reference(font)?;
//! doc.page_resource(pagewright::ResourceKind::Font)?.set("F1", font);
//!
//! doc.end()?;
//! assert_eq!(doc.state(), DocumentState::Closing { pending: 1 });
//!
//! doc.end_object(font, None)?;
//! assert!(doc.state().is_closed());
//! # Ok(())
//! # }
//! ```

pub mod compression;
pub mod document;
pub mod encryption;
pub mod error;
pub mod objects;
pub mod page;
pub mod structure;
pub mod version;
pub mod writer;

pub use document::{Document, DocumentOptions, DocumentState, Info, InfoValue, Ref};
pub use encryption::{PermissionFlags, Printing, StandardSecurityHandler};
pub use error::{PdfError, Result};
pub use objects::{Dictionary, Object, ObjectId};
pub use page::{Margins, Page, PageLayout, PageOptions, PageSize, ResourceKind};
pub use structure::{Destination, NameTree};
pub use version::PdfVersion;

/// Current version of pagewright
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_document() {
        let doc = Document::new(Vec::new(), DocumentOptions::default()).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.version(), PdfVersion::V1_3);
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }
}
