use super::info::{Info, InfoValue};
use crate::encryption::PermissionFlags;
use crate::page::PageOptions;
use crate::version::PdfVersion;

/// Everything fixed at document construction.
///
/// ```rust
/// use pagewright::{DocumentOptions, PageOptions, PdfVersion};
///
/// let options = DocumentOptions::default()
///     .with_version(PdfVersion::V1_4)
///     .with_page(PageOptions::a4())
///     .with_title("Quarterly report")
///     .with_user_password("secret");
/// assert!(options.compress);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DocumentOptions {
    #[cfg_attr(feature = "serde", serde(rename = "pdfVersion"))]
    pub version: PdfVersion,
    /// Deflate streams that carry no `/Filter` of their own.
    pub compress: bool,
    /// Keep pages open until [`Document::flush_pages`](crate::Document::flush_pages)
    /// or `end()`, so earlier pages can be revisited.
    pub buffer_pages: bool,
    pub auto_first_page: bool,
    /// Defaults for pages added without explicit options.
    pub page: PageOptions,
    pub info: Info,
    pub lang: Option<String>,
    pub display_title: bool,
    pub user_password: Option<String>,
    pub owner_password: Option<String>,
    pub permissions: PermissionFlags,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            version: PdfVersion::default(),
            compress: true,
            buffer_pages: false,
            auto_first_page: true,
            page: PageOptions::default(),
            info: Info::new(),
            lang: None,
            display_title: false,
            user_password: None,
            owner_password: None,
            permissions: PermissionFlags::default(),
        }
    }
}

impl DocumentOptions {
    pub fn with_version(mut self, version: PdfVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_buffer_pages(mut self, buffer_pages: bool) -> Self {
        self.buffer_pages = buffer_pages;
        self
    }

    pub fn with_auto_first_page(mut self, auto_first_page: bool) -> Self {
        self.auto_first_page = auto_first_page;
        self
    }

    pub fn with_page(mut self, page: PageOptions) -> Self {
        self.page = page;
        self
    }

    pub fn with_info(mut self, key: impl Into<String>, value: impl Into<InfoValue>) -> Self {
        self.info.set(key, value);
        self
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_info("Title", title.into())
    }

    pub fn with_author(self, author: impl Into<String>) -> Self {
        self.with_info("Author", author.into())
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn with_display_title(mut self, display_title: bool) -> Self {
        self.display_title = display_title;
        self
    }

    pub fn with_user_password(mut self, password: impl Into<String>) -> Self {
        self.user_password = Some(password.into());
        self
    }

    pub fn with_owner_password(mut self, password: impl Into<String>) -> Self {
        self.owner_password = Some(password.into());
        self
    }

    pub fn with_permissions(mut self, permissions: PermissionFlags) -> Self {
        self.permissions = permissions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::Printing;

    #[test]
    fn test_defaults() {
        let options = DocumentOptions::default();
        assert_eq!(options.version, PdfVersion::V1_3);
        assert!(options.compress);
        assert!(options.auto_first_page);
        assert!(!options.buffer_pages);
        assert!(options.info.is_empty());
        assert!(options.user_password.is_none());
    }

    #[test]
    fn test_builder_chain() {
        let options = DocumentOptions::default()
            .with_compression(false)
            .with_buffer_pages(true)
            .with_title("T")
            .with_author("A")
            .with_lang("en-US")
            .with_owner_password("owner")
            .with_permissions(PermissionFlags {
                printing: Some(Printing::LowResolution),
                ..Default::default()
            });

        assert!(!options.compress);
        assert!(options.buffer_pages);
        assert_eq!(options.info.len(), 2);
        assert_eq!(options.lang.as_deref(), Some("en-US"));
        assert_eq!(options.owner_password.as_deref(), Some("owner"));
        assert_eq!(options.permissions.printing, Some(Printing::LowResolution));
    }
}
