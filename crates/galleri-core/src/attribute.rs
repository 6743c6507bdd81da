//! Typed attribute values in the store's wire shape.
//!
//! Values serialize the way DynamoDB JSON expects them: a single-key object
//! whose key is the type tag (`S`, `N`, `BOOL`, `M`).

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A single tagged attribute value.
///
/// Numbers are carried as their source text; nothing here parses or
/// validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    S(String),
    N(String),
    Bool(bool),
    M(AttributeMap),
}

impl AttributeValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self::N(value.into())
    }

    /// Text of a scalar string or number value, used when the value acts as a key.
    pub fn key_text(&self) -> Option<&str> {
        match self {
            Self::S(v) | Self::N(v) => Some(v.as_str()),
            Self::Bool(_) | Self::M(_) => None,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::Bool(_) => "BOOL",
            Self::M(_) => "M",
        }
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::S(v) | Self::N(v) => map.serialize_entry(self.type_tag(), v)?,
            Self::Bool(v) => map.serialize_entry(self.type_tag(), v)?,
            Self::M(entries) => map.serialize_entry(self.type_tag(), entries)?,
        }
        map.end()
    }
}

/// Attribute name to value mapping that keeps insertion order.
///
/// Order only matters for readable output; lookups are by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, AttributeValue)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a value, replacing any earlier value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: AttributeValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, AttributeValue)> for AttributeMap {
    fn from_iter<T: IntoIterator<Item = (K, AttributeValue)>>(iter: T) -> Self {
        let mut map = AttributeMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
