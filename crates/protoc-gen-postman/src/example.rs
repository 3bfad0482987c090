//! Generic example value produced by [`synthesize`](crate::synthesize).

use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A synthesized example instance of a message (or one of its fields).
///
/// Objects keep their entries in schema declaration order so the emitted
/// JSON is stable across runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Example {
    /// Placeholder for `bool` fields.
    Bool(bool),
    /// Placeholder for every numeric field kind.
    Number(i64),
    /// Placeholder for string-like fields, plus the `"group"`/`"other"` markers.
    String(String),
    /// A repeated field: always a single sample element.
    List(Vec<Example>),
    /// A message: `field name → value`, in declaration order.
    Object(Vec<(String, Example)>),
}

impl Example {
    /// Entries of an object value, or `None` for any other variant.
    #[must_use]
    pub fn as_object(&self) -> Option<&[(String, Example)]> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a field of an object value by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Example> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Render as JSON indented with four spaces.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl Serialize for Example {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_i64(*n),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Query-string text form.
///
/// Scalars print bare; lists and objects use the bracketed `[a b]` and
/// `map[k:v]` notation that existing collections were generated with.
/// Object keys print in sorted order.
impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(entries) => {
                let mut sorted: Vec<_> = entries.iter().collect();
                sorted.sort_by(|(a, _), (b, _)| a.cmp(b));

                f.write_str("map[")?;
                for (i, (key, value)) in sorted.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{key}:{value}")?;
                }
                f.write_str("]")
            }
        }
    }
}
