use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::Value;
use std::fmt;

/// A dimension exactly as it appears in the input document.
///
/// Entries are kept as raw key/value pairs in source order so that duplicate names and
/// non-string sequences survive parsing and can be reported by the validator instead of
/// being silently collapsed by a map type.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDimension {
    Entries(Vec<(String, Value)>),
    /// The element was not an object; holds a short description of what was found.
    Malformed(&'static str),
}

impl<'de> Deserialize<'de> for RawDimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawDimensionVisitor)
    }
}

struct RawDimensionVisitor;

impl<'de> Visitor<'de> for RawDimensionVisitor {
    type Value = RawDimension;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a dimension object mapping entity names to sequences")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, value)) = map.next_entry::<String, Value>()? {
            entries.push((name, value));
        }
        Ok(RawDimension::Entries(entries))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawDimension::Malformed("an array"))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(RawDimension::Malformed("a string"))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(RawDimension::Malformed("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(RawDimension::Malformed("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(RawDimension::Malformed("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(RawDimension::Malformed("a number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(RawDimension::Malformed("null"))
    }
}

impl RawDimension {
    /// Builds a well-formed raw dimension from string pairs; convenient for tests and
    /// for callers that assemble dimensions programmatically.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        RawDimension::Entries(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }
}

/// A validated dimension: unique entity names, each with a sequence, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dimension {
    entries: Vec<(String, String)>,
}

impl Dimension {
    pub(crate) fn from_validated(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}
