//! Name tree leaf (ISO 32000-1 Section 7.9.6).
//!
//! Entries are kept in a [`BTreeMap`], so serialization walks them sorted by
//! key bytes regardless of insertion order. The encoder writes the tree as a
//! single leaf with `/Limits` when it holds more than one entry.

use crate::objects::Object;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTree {
    names: BTreeMap<String, Object>,
}

impl NameTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the value stored under `name`.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Object>) {
        self.names.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Object> {
        self.names.get(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Object)> {
        self.names.iter()
    }

    /// Smallest and largest key, only when there is more than one entry.
    pub fn limits(&self) -> Option<(&str, &str)> {
        if self.names.len() < 2 {
            return None;
        }
        let first = self.names.keys().next()?;
        let last = self.names.keys().next_back()?;
        Some((first.as_str(), last.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_iterate_sorted() {
        let mut tree = NameTree::new();
        tree.add("Cherry", 3);
        tree.add("Apple", 1);
        tree.add("Banana", 2);

        let keys: Vec<_> = tree.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Apple", "Banana", "Cherry"]);
        assert_eq!(tree.get("Banana"), Some(&Object::Integer(2)));
    }

    #[test]
    fn test_limits_need_two_entries() {
        let mut tree = NameTree::new();
        assert_eq!(tree.limits(), None);

        tree.add("only", Object::Null);
        assert_eq!(tree.limits(), None);

        tree.add("alpha", Object::Null);
        tree.add("zulu", Object::Null);
        assert_eq!(tree.limits(), Some(("alpha", "zulu")));
    }

    #[test]
    fn test_add_replaces() {
        let mut tree = NameTree::new();
        tree.add("intro", 1);
        tree.add("intro", 2);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("intro"), Some(&Object::Integer(2)));
    }
}
