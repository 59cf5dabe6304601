use crate::objects::Object;
use indexmap::IndexMap;

/// Dictionary whose entries serialize in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<String, Object>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts or replaces `key`. A replaced key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Object>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Object> {
        self.entries.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Object> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Object)> {
        self.entries.iter()
    }

    pub fn get_dict(&self, key: &str) -> Option<&Dictionary> {
        self.get(key).and_then(Object::as_dict)
    }

    pub fn get_dict_mut(&mut self, key: &str) -> Option<&mut Dictionary> {
        match self.entries.get_mut(key) {
            Some(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        }
    }

    /// Returns the sub-dictionary under `key`, inserting an empty one first
    /// when the key is missing or holds a different kind of value.
    pub fn get_or_insert_dict(&mut self, key: impl Into<String>) -> &mut Dictionary {
        let slot = self
            .entries
            .entry(key.into())
            .or_insert_with(|| Object::Dictionary(Dictionary::new()));
        if !matches!(slot, Object::Dictionary(_)) {
            *slot = Object::Dictionary(Dictionary::new());
        }
        match slot {
            Object::Dictionary(dict) => dict,
            _ => unreachable!("slot holds a dictionary"),
        }
    }

    /// Array counterpart of [`Dictionary::get_or_insert_dict`].
    pub fn get_or_insert_array(&mut self, key: impl Into<String>) -> &mut Vec<Object> {
        let slot = self
            .entries
            .entry(key.into())
            .or_insert_with(|| Object::Array(Vec::new()));
        if !matches!(slot, Object::Array(_)) {
            *slot = Object::Array(Vec::new());
        }
        match slot {
            Object::Array(items) => items,
            _ => unreachable!("slot holds an array"),
        }
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(String, Object)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (String, Object)>>(iter: T) -> Self {
        let mut dict = Dictionary::new();
        for (key, value) in iter {
            dict.set(key, value);
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dictionary() {
        let dict = Dictionary::new();
        assert!(dict.is_empty());
        assert_eq!(dict.len(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut dict = Dictionary::new();
        dict.set("Title", "Report");
        dict.set("Count", 42);
        dict.set("Open", true);

        assert_eq!(dict.get("Title"), Some(&Object::String("Report".to_string())));
        assert_eq!(dict.get("Count"), Some(&Object::Integer(42)));
        assert_eq!(dict.get("Open"), Some(&Object::Boolean(true)));
        assert_eq!(dict.get("Missing"), None);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::name("Page"));
        dict.set("Parent", 1);
        dict.set("MediaBox", vec![Object::Integer(0)]);
        dict.set("Type", Object::name("Pages"));

        let keys: Vec<_> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Type", "Parent", "MediaBox"]);
        assert_eq!(dict.get("Type"), Some(&Object::name("Pages")));
    }

    #[test]
    fn test_remove_keeps_order_of_rest() {
        let mut dict = Dictionary::new();
        dict.set("A", 1);
        dict.set("B", 2);
        dict.set("C", 3);

        assert_eq!(dict.remove("B"), Some(Object::Integer(2)));
        let keys: Vec<_> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["A", "C"]);
        assert_eq!(dict.remove("B"), None);
    }

    #[test]
    fn test_get_or_insert_dict() {
        let mut resources = Dictionary::new();
        resources
            .get_or_insert_dict("Font")
            .set("F1", Object::name("Helvetica"));
        resources
            .get_or_insert_dict("Font")
            .set("F2", Object::name("Courier"));

        let fonts = resources.get_dict("Font").unwrap();
        assert_eq!(fonts.len(), 2);
    }

    #[test]
    fn test_get_or_insert_dict_replaces_other_kinds() {
        let mut dict = Dictionary::new();
        dict.set("XObject", Object::Null);
        assert!(dict.get_or_insert_dict("XObject").is_empty());
        assert!(dict.get_dict("XObject").is_some());
    }

    #[test]
    fn test_get_or_insert_array() {
        let mut page = Dictionary::new();
        page.get_or_insert_array("Annots").push(Object::Integer(1));
        page.get_or_insert_array("Annots").push(Object::Integer(2));
        assert_eq!(page.get("Annots").and_then(Object::as_array).unwrap().len(), 2);
    }

    #[test]
    fn test_get_dict_mut() {
        let mut dict = Dictionary::new();
        dict.set("Inner", Dictionary::new());
        dict.get_dict_mut("Inner").unwrap().set("Key", 1);
        assert_eq!(
            dict.get_dict("Inner").unwrap().get("Key"),
            Some(&Object::Integer(1))
        );
        assert!(dict.get_dict_mut("Missing").is_none());
    }

    #[test]
    fn test_from_iterator() {
        let dict: Dictionary = vec![
            ("Z".to_string(), Object::Integer(1)),
            ("A".to_string(), Object::Integer(2)),
        ]
        .into_iter()
        .collect();
        let keys: Vec<_> = dict.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Z", "A"]);
    }
}
