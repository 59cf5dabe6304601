use crate::objects::Dictionary;
use crate::structure::NameTree;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    number: u32,
    generation: u16,
}

impl ObjectId {
    pub fn new(number: u32, generation: u16) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}

/// A semantic PDF value, encoded to wire syntax by [`crate::writer::encode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Name(String),
    /// Literal `( ... )` string. Text outside ASCII is written as UTF-16BE.
    String(String),
    /// Hex `< ... >` string. Never passed through the string cipher.
    ByteString(Vec<u8>),
    Date(DateTime<Utc>),
    Array(Vec<Object>),
    Dictionary(Dictionary),
    Reference(ObjectId),
    NameTree(NameTree),
}

impl Object {
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(f) => Some(*f),
            Object::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Object>> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<ObjectId> {
        match self {
            Object::Reference(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<u32> for Object {
    fn from(i: u32) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Integer(i)
    }
}

impl From<usize> for Object {
    fn from(i: usize) -> Self {
        Object::Integer(i as i64)
    }
}

impl From<f32> for Object {
    fn from(f: f32) -> Self {
        Object::Real(f as f64)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Real(f)
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::String(s)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(s.to_string())
    }
}

impl From<Vec<Object>> for Object {
    fn from(v: Vec<Object>) -> Self {
        Object::Array(v)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Object::Dictionary(d)
    }
}

impl From<ObjectId> for Object {
    fn from(id: ObjectId) -> Self {
        Object::Reference(id)
    }
}

impl From<DateTime<Utc>> for Object {
    fn from(date: DateTime<Utc>) -> Self {
        Object::Date(date)
    }
}

impl From<NameTree> for Object {
    fn from(tree: NameTree) -> Self {
        Object::NameTree(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_display() {
        let id = ObjectId::new(12, 0);
        assert_eq!(id.to_string(), "12 0 R");
        assert_eq!(id.number(), 12);
        assert_eq!(id.generation(), 0);
    }

    #[test]
    fn test_object_id_ordering() {
        assert!(ObjectId::new(1, 0) < ObjectId::new(2, 0));
        assert!(ObjectId::new(2, 0) < ObjectId::new(2, 1));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Object::from(true), Object::Boolean(true));
        assert_eq!(Object::from(7u32), Object::Integer(7));
        assert_eq!(Object::from(3usize), Object::Integer(3));
        assert_eq!(Object::from(1.5), Object::Real(1.5));
        assert_eq!(Object::from("text"), Object::String("text".to_string()));
        assert_eq!(Object::name("Page"), Object::Name("Page".to_string()));
        assert_eq!(
            Object::from(ObjectId::new(4, 0)),
            Object::Reference(ObjectId::new(4, 0))
        );
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Object::Integer(3).as_real(), Some(3.0));
        assert_eq!(Object::Real(2.5).as_integer(), None);
        assert_eq!(Object::name("Type").as_name(), Some("Type"));
        assert_eq!(Object::from("x").as_name(), None);
        assert!(Object::Null.is_null());
        assert_eq!(
            Object::Reference(ObjectId::new(9, 0)).as_reference(),
            Some(ObjectId::new(9, 0))
        );
        let arr = Object::from(vec![Object::Integer(1)]);
        assert_eq!(arr.as_array().map(Vec::len), Some(1));
        let dict = Object::Dictionary(Dictionary::new());
        assert!(dict.as_dict().is_some_and(Dictionary::is_empty));
        assert!(arr.as_dict().is_none());
    }
}
