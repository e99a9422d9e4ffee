// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! The materialized value tree.
//!
//! This is both the parser's output and the serializer's input. Mappings are
//! insertion ordered and never reordered.

use ordermap::OrderMap;
use serde::{Deserialize, Serialize};

/// A materialized configuration value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(OrderMap<String, Value>),
}

/// Error returned by [`Value::set_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A numeric segment points past the end of a sequence (appending is allowed).
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
    /// A non-numeric segment was used on a sequence.
    NotAnIndex { path: String, segment: String },
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { path, index, len } => write!(
                f,
                "index {index} out of range for sequence of length {len} in path '{path}'"
            ),
            Self::NotAnIndex { path, segment } => {
                write!(f, "segment '{segment}' is not a sequence index in path '{path}'")
            }
        }
    }
}

impl std::error::Error for PathError {}

impl Value {
    /// Name of the variant, for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Floats, and integers converted to floats.
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "Integers are widened on request")]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_mapping(&self) -> Option<&OrderMap<String, Value>> {
        match self {
            Self::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Get a child by mapping key, or by index for sequences.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Mapping(entries) => entries.get(key),
            Self::Sequence(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// Get a nested value by dot-separated path, e.g. `servers.0.host`.
    ///
    /// An empty path returns the value itself.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |value, segment| value.get(segment))
    }

    /// Set a nested value by dot-separated path.
    ///
    /// Missing intermediate entries, and entries that are not collections,
    /// are replaced by mappings. Numeric segments index sequences, and the
    /// index one past the end appends.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] when an index is out of range or a sequence is
    /// addressed with a non-numeric segment. The value may already have been
    /// modified along the path when this happens.
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<(), PathError> {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut current = self;
        for segment in parents {
            current = current.child_mut(segment, path)?;
        }
        current.set_child(last, value, path)
    }

    fn child_mut(&mut self, segment: &str, path: &str) -> Result<&mut Value, PathError> {
        match self {
            Self::Mapping(entries) => Ok(entries.entry(segment.to_owned()).or_default()),
            Self::Sequence(items) => {
                let index = sequence_index(segment, path)?;
                let len = items.len();
                if index == len {
                    items.push(Value::Null);
                }
                items.get_mut(index).ok_or_else(|| PathError::IndexOutOfRange {
                    path: path.to_owned(),
                    index,
                    len,
                })
            }
            other => {
                *other = Self::Mapping(OrderMap::new());
                other.child_mut(segment, path)
            }
        }
    }

    fn set_child(&mut self, segment: &str, value: Value, path: &str) -> Result<(), PathError> {
        match self {
            Self::Mapping(entries) => {
                entries.insert(segment.to_owned(), value);
                Ok(())
            }
            Self::Sequence(items) => {
                let index = sequence_index(segment, path)?;
                let len = items.len();
                if index == len {
                    items.push(value);
                    return Ok(());
                }
                let slot = items.get_mut(index).ok_or_else(|| PathError::IndexOutOfRange {
                    path: path.to_owned(),
                    index,
                    len,
                })?;
                *slot = value;
                Ok(())
            }
            other => {
                *other = Self::Mapping(OrderMap::new());
                other.set_child(segment, value, path)
            }
        }
    }
}

fn sequence_index(segment: &str, path: &str) -> Result<usize, PathError> {
    segment.parse().map_err(|_| PathError::NotAnIndex {
        path: path.to_owned(),
        segment: segment.to_owned(),
    })
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Sequence(items)
    }
}

impl From<OrderMap<String, Value>> for Value {
    fn from(entries: OrderMap<String, Value>) -> Self {
        Self::Mapping(entries)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(value) => Self::Bool(value),
            serde_json::Value::Number(number) => number.as_i64().map_or_else(
                || number.as_f64().map_or(Self::Null, Self::Float),
                Self::Int,
            ),
            serde_json::Value::String(value) => Self::String(value),
            serde_json::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Non-finite floats have no JSON representation and become `null`.
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(value) => Self::Bool(value),
            Value::Int(value) => Self::Number(value.into()),
            Value::Float(value) => serde_json::Number::from_f64(value).map_or(Self::Null, Self::Number),
            Value::String(value) => Self::String(value),
            Value::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Mapping(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        Value::from(json!({
            "server": {"host": "localhost", "ports": [80, 443]},
            "debug": false,
            "ratio": 0.5
        }))
    }

    #[test]
    fn test_accessors() {
        let value = sample();
        assert_eq!(value.type_name(), "mapping");
        assert_eq!(value.get("debug").and_then(Value::as_bool), Some(false));
        assert_eq!(value.get("ratio").and_then(Value::as_f64), Some(0.5));
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_get_path() {
        let value = sample();
        assert_eq!(
            value.get_path("server.host").and_then(Value::as_str),
            Some("localhost")
        );
        assert_eq!(
            value.get_path("server.ports.1").and_then(Value::as_i64),
            Some(443)
        );
        assert_eq!(value.get_path("server.ports.2"), None);
        assert_eq!(value.get_path("server.host.name"), None);
        assert_eq!(value.get_path(""), Some(&value));
    }

    #[test]
    fn test_set_path_creates_mappings() {
        let mut value = Value::Null;
        value.set_path("a.b.c", Value::Int(1)).unwrap();
        assert_eq!(serde_json::Value::from(value), json!({"a": {"b": {"c": 1}}}));
    }

    #[test]
    fn test_set_path_replaces_scalars_and_keeps_order() {
        let mut value = sample();
        value.set_path("debug.level", Value::from("high")).unwrap();
        value.set_path("ratio", Value::Int(2)).unwrap();
        assert_eq!(
            serde_json::Value::from(value),
            json!({
                "server": {"host": "localhost", "ports": [80, 443]},
                "debug": {"level": "high"},
                "ratio": 2
            })
        );
    }

    #[test]
    fn test_set_path_sequences() {
        let mut value = sample();
        value.set_path("server.ports.0", Value::Int(8080)).unwrap();
        value.set_path("server.ports.2", Value::Int(9090)).unwrap();
        assert_eq!(
            value.get_path("server.ports"),
            Some(&Value::from(vec![
                Value::Int(8080),
                Value::Int(443),
                Value::Int(9090)
            ]))
        );

        let err = value.set_path("server.ports.7", Value::Null).unwrap_err();
        assert_eq!(
            err,
            PathError::IndexOutOfRange {
                path: "server.ports.7".to_owned(),
                index: 7,
                len: 3
            }
        );
        assert!(matches!(
            value.set_path("server.ports.first", Value::Null),
            Err(PathError::NotAnIndex { .. })
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let json = json!({"z": 1, "a": [true, null, "x"], "m": 1.5});
        let value = Value::from(json.clone());
        assert_eq!(
            value
                .as_mapping()
                .map(|entries| entries.keys().cloned().collect::<Vec<_>>()),
            Some(vec!["z".to_owned(), "a".to_owned(), "m".to_owned()])
        );
        assert_eq!(serde_json::Value::from(value), json);
    }

    #[test]
    fn test_non_finite_floats_become_json_null() {
        assert_eq!(
            serde_json::Value::from(Value::Float(f64::INFINITY)),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_serialize_untagged() {
        let value = Value::from(json!({"a": [1, "b", null]}));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"a":[1,"b",null]}"#
        );
    }
}
