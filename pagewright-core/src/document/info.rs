//! Document information dictionary and the file identifier derived from it.

use crate::error::{PdfError, Result};
use crate::objects::{Dictionary, Object};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

pub(crate) const PRODUCER: &str = "pagewright";

/// A value in the `/Info` dictionary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum InfoValue {
    Date(DateTime<Utc>),
    Text(String),
}

impl InfoValue {
    /// Reads a config value: RFC 3339 strings under `*Date` keys become
    /// dates, everything else stays text.
    pub fn parse(key: &str, value: String) -> Self {
        if key.ends_with("Date") {
            if let Ok(date) = DateTime::parse_from_rfc3339(&value) {
                return InfoValue::Date(date.with_timezone(&Utc));
            }
        }
        InfoValue::Text(value)
    }

    fn to_object(&self) -> Object {
        match self {
            InfoValue::Date(date) => Object::Date(*date),
            InfoValue::Text(text) => Object::String(text.clone()),
        }
    }

    /// Form used when hashing the file identifier; dates hash as epoch
    /// milliseconds.
    fn id_form(&self) -> String {
        match self {
            InfoValue::Date(date) => date.timestamp_millis().to_string(),
            InfoValue::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for InfoValue {
    fn from(text: &str) -> Self {
        InfoValue::Text(text.to_string())
    }
}

impl From<String> for InfoValue {
    fn from(text: String) -> Self {
        InfoValue::Text(text)
    }
}

impl From<DateTime<Utc>> for InfoValue {
    fn from(date: DateTime<Utc>) -> Self {
        InfoValue::Date(date)
    }
}

/// Ordered `/Info` entries. Keys keep the position of their first insert.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Info {
    entries: IndexMap<String, InfoValue>,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Info {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <IndexMap<String, String> as serde::Deserialize>::deserialize(deserializer)?;
        let mut info = Info::new();
        for (key, value) in raw {
            let value = InfoValue::parse(&key, value);
            info.set(key, value);
        }
        Ok(info)
    }
}

impl Info {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Producer`, `Creator` and `CreationDate` followed by `overrides`.
    pub fn with_defaults(creation_date: DateTime<Utc>, overrides: &Info) -> Self {
        let mut info = Info::new();
        info.set("Producer", PRODUCER);
        info.set("Creator", PRODUCER);
        info.set("CreationDate", creation_date);
        for (key, value) in overrides.iter() {
            info.set(key.clone(), value.clone());
        }
        info
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<InfoValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InfoValue)> {
        self.entries.iter()
    }

    pub fn creation_date(&self) -> Result<DateTime<Utc>> {
        match self.entries.get("CreationDate") {
            Some(InfoValue::Date(date)) => Ok(*date),
            Some(InfoValue::Text(text)) => Err(PdfError::Validation(format!(
                "CreationDate must be a date, got '{text}'"
            ))),
            None => Err(PdfError::Validation("CreationDate is missing".to_string())),
        }
    }

    /// MD5 over the creation time and every entry, one `key: value` line each.
    pub fn file_id(&self) -> Result<[u8; 16]> {
        let mut seed = format!("{}\n", self.creation_date()?.timestamp_millis());
        for (key, value) in &self.entries {
            seed.push_str(key);
            seed.push_str(": ");
            seed.push_str(&value.id_form());
            seed.push('\n');
        }
        Ok(md5::compute(seed.as_bytes()).0)
    }

    pub fn to_dictionary(&self) -> Dictionary {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_object()))
            .collect()
    }
}
