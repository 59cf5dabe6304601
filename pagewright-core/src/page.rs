use crate::document::Ref;
use crate::error::{PdfError, Result};

/// Page margins in points (1/72 inch).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Margins {
    pub fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            left: margin,
            bottom: margin,
            right: margin,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(72.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PageLayout {
    #[default]
    Portrait,
    Landscape,
}

/// Either a named paper size (case-insensitive, e.g. `"A4"`, `"letter"`) or
/// explicit `[width, height]` in points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PageSize {
    Named(String),
    Custom([f64; 2]),
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Named("LETTER".to_string())
    }
}

/// Portrait dimensions of the named paper sizes, in points.
const SIZES: &[(&str, [f64; 2])] = &[
    ("4A0", [4767.87, 6740.79]),
    ("2A0", [3370.39, 4767.87]),
    ("A0", [2383.94, 3370.39]),
    ("A1", [1683.78, 2383.94]),
    ("A2", [1190.55, 1683.78]),
    ("A3", [841.89, 1190.55]),
    ("A4", [595.28, 841.89]),
    ("A5", [419.53, 595.28]),
    ("A6", [297.64, 419.53]),
    ("A7", [209.76, 297.64]),
    ("A8", [147.4, 209.76]),
    ("A9", [104.88, 147.4]),
    ("A10", [73.7, 104.88]),
    ("B0", [2834.65, 4008.19]),
    ("B1", [2004.09, 2834.65]),
    ("B2", [1417.32, 2004.09]),
    ("B3", [1000.63, 1417.32]),
    ("B4", [708.66, 1000.63]),
    ("B5", [498.9, 708.66]),
    ("B6", [354.33, 498.9]),
    ("B7", [249.45, 354.33]),
    ("B8", [175.75, 249.45]),
    ("B9", [124.72, 175.75]),
    ("B10", [87.87, 124.72]),
    ("C0", [2599.37, 3676.54]),
    ("C1", [1836.85, 2599.37]),
    ("C2", [1298.27, 1836.85]),
    ("C3", [918.43, 1298.27]),
    ("C4", [649.13, 918.43]),
    ("C5", [459.21, 649.13]),
    ("C6", [323.15, 459.21]),
    ("C7", [229.61, 323.15]),
    ("C8", [161.57, 229.61]),
    ("C9", [113.39, 161.57]),
    ("C10", [79.37, 113.39]),
    ("RA0", [2437.8, 3458.27]),
    ("RA1", [1729.13, 2437.8]),
    ("RA2", [1218.9, 1729.13]),
    ("RA3", [864.57, 1218.9]),
    ("RA4", [609.45, 864.57]),
    ("SRA0", [2551.18, 3628.35]),
    ("SRA1", [1814.17, 2551.18]),
    ("SRA2", [1275.59, 1814.17]),
    ("SRA3", [907.09, 1275.59]),
    ("SRA4", [637.8, 907.09]),
    ("EXECUTIVE", [521.86, 756.0]),
    ("FOLIO", [612.0, 936.0]),
    ("LEGAL", [612.0, 1008.0]),
    ("LETTER", [612.0, 792.0]),
    ("TABLOID", [792.0, 1224.0]),
];

impl PageSize {
    pub fn named(name: impl Into<String>) -> Self {
        PageSize::Named(name.into())
    }

    /// Portrait `[width, height]`.
    pub fn dimensions(&self) -> Result<[f64; 2]> {
        match self {
            PageSize::Custom([w, h]) => {
                if !(w.is_finite() && h.is_finite() && *w > 0.0 && *h > 0.0) {
                    return Err(PdfError::Validation(format!(
                        "page size [{w}, {h}] must be positive"
                    )));
                }
                Ok([*w, *h])
            }
            PageSize::Named(name) => SIZES
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(name))
                .map(|(_, dims)| *dims)
                .ok_or_else(|| PdfError::Validation(format!("unknown page size '{name}'"))),
        }
    }
}

/// Size, orientation and margins for a new page.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageOptions {
    pub size: PageSize,
    pub layout: PageLayout,
    pub margins: Margins,
}

impl PageOptions {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn a4() -> Self {
        Self::new(PageSize::named("A4"))
    }

    pub fn letter() -> Self {
        Self::new(PageSize::named("LETTER"))
    }

    pub fn landscape(mut self) -> Self {
        self.layout = PageLayout::Landscape;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// `(width, height)` after applying the layout.
    pub fn resolve(&self) -> Result<(f64, f64)> {
        let [w, h] = self.size.dimensions()?;
        Ok(match self.layout {
            PageLayout::Portrait => (w, h),
            PageLayout::Landscape => (h, w),
        })
    }
}

/// A page living in the document's page buffer.
///
/// Each page owns three indirect objects: its content stream, its resource
/// dictionary and the page dictionary itself.
#[derive(Clone, Debug)]
pub struct Page {
    width: f64,
    height: f64,
    margins: Margins,
    content: Ref,
    resources: Ref,
    dictionary: Ref,
}

impl Page {
    pub(crate) fn new(
        width: f64,
        height: f64,
        margins: Margins,
        content: Ref,
        resources: Ref,
        dictionary: Ref,
    ) -> Self {
        Self {
            width,
            height,
            margins,
            content,
            resources,
            dictionary,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    /// `(left, bottom, right, top)` inside the margins, in PDF space.
    pub fn content_area(&self) -> (f64, f64, f64, f64) {
        (
            self.margins.left,
            self.margins.bottom,
            self.width - self.margins.right,
            self.height - self.margins.top,
        )
    }

    pub fn content(&self) -> Ref {
        self.content
    }

    pub fn resources(&self) -> Ref {
        self.resources
    }

    pub fn dictionary(&self) -> Ref {
        self.dictionary
    }
}

/// Resource categories held in a page's `/Resources` dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Font,
    XObject,
    ExtGState,
    Pattern,
    ColorSpace,
    Shading,
}

impl ResourceKind {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ResourceKind::Font => "Font",
            ResourceKind::XObject => "XObject",
            ResourceKind::ExtGState => "ExtGState",
            ResourceKind::Pattern => "Pattern",
            ResourceKind::ColorSpace => "ColorSpace",
            ResourceKind::Shading => "Shading",
        }
    }
}
