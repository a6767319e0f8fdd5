//! Ordered tag/value record produced by the tokenizer.

use std::fmt;

use hashbrown::HashMap;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

/// Suffix marking the internationalized variant of a tag.
pub const INTL_SUFFIX: &str = "_intl";

/// Tag/value pairs of one ADIF record or header, in source order.
///
/// Tag names are stored lower-cased. Setting a tag twice keeps its
/// original position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
    pos: HashMap<String, usize>,
    /// Base tag name to the position of its `_intl` variant.
    intl: HashMap<String, usize>,
}

impl RawRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `tag` to `value`.
    pub fn insert(&mut self, tag: &str, value: impl Into<String>) {
        let tag = tag.to_ascii_lowercase();
        let value = value.into();
        match self.pos.get(&tag) {
            Some(&idx) => self.fields[idx].1 = value,
            None => {
                let idx = self.fields.len();
                if let Some(base) = tag.strip_suffix(INTL_SUFFIX) {
                    self.intl.insert(base.to_string(), idx);
                }
                self.pos.insert(tag.clone(), idx);
                self.fields.push((tag, value));
            }
        }
    }

    /// Returns the value stored under exactly `tag`, if non-empty.
    pub fn raw(&self, tag: &str) -> Option<&str> {
        self.pos.get(tag).and_then(|&idx| self.value_at(idx))
    }

    fn value_at(&self, idx: usize) -> Option<&str> {
        Some(self.fields[idx].1.as_str()).filter(|v| !v.is_empty())
    }

    /// Returns the value for `tag`, falling back to its `_intl` variant.
    ///
    /// Empty values are treated as absent.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.raw(tag)
            .or_else(|| self.intl.get(tag).and_then(|&idx| self.value_at(idx)))
    }

    /// Returns the first present tag among `tags`.
    pub fn first_of(&self, tags: &[&str]) -> Option<&str> {
        tags.iter().find_map(|t| self.get(t))
    }

    /// True when `tag` (or its `_intl` variant) holds `Y` or `V`.
    pub fn is_yes(&self, tag: &str) -> bool {
        matches!(self.get(tag), Some(v) if v.eq_ignore_ascii_case("y") || v.eq_ignore_ascii_case("v"))
    }

    /// Iterates fields in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rec = Self::new();
        for (k, v) in iter {
            rec.insert(k.as_ref(), v);
        }
        rec
    }
}

impl Serialize for RawRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct RawRecordVisitor;

impl<'de> Visitor<'de> for RawRecordVisitor {
    type Value = RawRecord;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of ADIF tags to string values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut rec = RawRecord::new();
        while let Some((k, v)) = access.next_entry::<String, String>()? {
            rec.insert(&k, v);
        }
        Ok(rec)
    }
}

impl<'de> Deserialize<'de> for RawRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RawRecordVisitor)
    }
}
