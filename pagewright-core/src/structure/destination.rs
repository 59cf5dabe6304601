//! Explicit destinations (ISO 32000-1 Section 12.3.2.2).

use crate::objects::{Object, ObjectId};

/// How a viewer positions the target page. Coordinates are given in the
/// caller's top-left space; `XYZ` tops are flipped into PDF space when the
/// destination is bound to a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Destination {
    XYZ {
        left: Option<f64>,
        top: Option<f64>,
        zoom: Option<f64>,
    },
    Fit,
    FitH {
        top: Option<f64>,
    },
    FitV {
        left: Option<f64>,
    },
    FitR {
        left: f64,
        bottom: f64,
        right: f64,
        top: f64,
    },
    FitB,
    FitBH {
        top: Option<f64>,
    },
    FitBV {
        left: Option<f64>,
    },
}

impl Default for Destination {
    fn default() -> Self {
        Destination::XYZ {
            left: None,
            top: None,
            zoom: None,
        }
    }
}

fn number_or_null(value: Option<f64>) -> Object {
    value.map(Object::Real).unwrap_or(Object::Null)
}

impl Destination {
    pub fn xyz(left: f64, top: f64, zoom: Option<f64>) -> Self {
        Destination::XYZ {
            left: Some(left),
            top: Some(top),
            zoom,
        }
    }

    /// Destination array `[page /Kind args...]` for a page of `page_height`.
    pub fn to_array(&self, page: ObjectId, page_height: f64) -> Vec<Object> {
        let mut arr = vec![Object::Reference(page)];
        match *self {
            Destination::XYZ { left, top, zoom } => {
                arr.push(Object::name("XYZ"));
                arr.push(number_or_null(left));
                arr.push(number_or_null(top.map(|t| page_height - t)));
                arr.push(number_or_null(zoom));
            }
            Destination::Fit => arr.push(Object::name("Fit")),
            Destination::FitH { top } => {
                arr.push(Object::name("FitH"));
                arr.push(number_or_null(top));
            }
            Destination::FitV { left } => {
                arr.push(Object::name("FitV"));
                arr.push(number_or_null(left));
            }
            Destination::FitR {
                left,
                bottom,
                right,
                top,
            } => {
                arr.push(Object::name("FitR"));
                arr.extend([left, bottom, right, top].map(Object::Real));
            }
            Destination::FitB => arr.push(Object::name("FitB")),
            Destination::FitBH { top } => {
                arr.push(Object::name("FitBH"));
                arr.push(number_or_null(top));
            }
            Destination::FitBV { left } => {
                arr.push(Object::name("FitBV"));
                arr.push(number_or_null(left));
            }
        }
        arr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unpositioned_xyz() {
        let arr = Destination::default().to_array(ObjectId::new(5, 0), 792.0);
        assert_eq!(
            arr,
            vec![
                Object::Reference(ObjectId::new(5, 0)),
                Object::name("XYZ"),
                Object::Null,
                Object::Null,
                Object::Null,
            ]
        );
    }

    #[test]
    fn test_xyz_top_is_flipped() {
        let arr = Destination::xyz(72.0, 100.0, Some(2.0)).to_array(ObjectId::new(5, 0), 792.0);
        assert_eq!(arr[2], Object::Real(72.0));
        assert_eq!(arr[3], Object::Real(692.0));
        assert_eq!(arr[4], Object::Real(2.0));
    }

    #[test]
    fn test_fit_variants() {
        let page = ObjectId::new(3, 0);
        assert_eq!(Destination::Fit.to_array(page, 100.0).len(), 2);
        assert_eq!(
            Destination::FitH { top: Some(10.0) }.to_array(page, 100.0)[2],
            Object::Real(10.0)
        );
        let rect = Destination::FitR {
            left: 0.0,
            bottom: 1.0,
            right: 2.0,
            top: 3.0,
        }
        .to_array(page, 100.0);
        assert_eq!(rect.len(), 6);
        assert_eq!(rect[1], Object::name("FitR"));
        assert_eq!(
            Destination::FitBV { left: None }.to_array(page, 100.0)[2],
            Object::Null
        );
    }
}
