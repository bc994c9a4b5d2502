//! Dot-notation path access for nested records
//!
//! This module resolves, writes and removes values addressed by dot-separated
//! paths such as `info.email` or `hobbies.0`. Numeric segments address array
//! elements when the node they are applied to is an array, and plain keys
//! otherwise.
//!
//! Writes create missing intermediate containers: an object for a key segment,
//! an array for a numeric segment. A scalar found in the way of a write is
//! replaced by the container the next segment needs.
//!
//! Copyright (c) 2025 Normalize Data Team
//! Licensed under the Apache-2.0 license

#[cfg(test)]
mod prop_tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Largest array index a write may address
///
/// Writes pad arrays with `null` up to the index they target, so the bound
/// caps that padding. Reads and deletes accept any index.
pub const MAX_WRITE_INDEX: usize = 65_535;

/// A single segment of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object key
    Key(String),
    /// Canonical non-negative integer; an array index or an object key with the same text
    Index(usize),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        let canonical = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && (raw == "0" || !raw.starts_with('0'));

        match raw.parse::<usize>() {
            Ok(index) if canonical => Segment::Index(index),
            _ => Segment::Key(raw.to_string()),
        }
    }

    /// The object key this segment addresses
    pub fn key(&self) -> String {
        match self {
            Segment::Key(key) => key.clone(),
            Segment::Index(index) => index.to_string(),
        }
    }

    fn empty_container(&self) -> Value {
        match self {
            Segment::Key(_) => Value::Object(Map::new()),
            Segment::Index(_) => Value::Array(Vec::new()),
        }
    }

    fn fits(&self, node: &Value) -> bool {
        matches!(
            (self, node),
            (_, Value::Object(_)) | (Segment::Index(_), Value::Array(_))
        )
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// A parsed, validated dot-notation path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a dot-separated path
    ///
    /// Empty paths and empty segments (`a..b`, `.a`, `a.`) are rejected.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::InvalidPath {
                path: path.to_string(),
                message: "path is empty".to_string(),
            });
        }

        let mut segments = Vec::new();
        for (position, raw) in path.split('.').enumerate() {
            if raw.is_empty() {
                return Err(Error::InvalidPath {
                    path: path.to_string(),
                    message: format!("segment {} is empty", position),
                });
            }
            segments.push(Segment::parse(raw));
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The path as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Check that [`FieldPath::set`] can write at this path
    ///
    /// Fails with [`Error::InvalidPath`] when a numeric segment is above
    /// [`MAX_WRITE_INDEX`].
    pub fn check_writable(&self) -> Result<()> {
        match self.segments.iter().find_map(|segment| match segment {
            Segment::Index(index) if *index > MAX_WRITE_INDEX => Some(*index),
            _ => None,
        }) {
            Some(index) => Err(Error::InvalidPath {
                path: self.raw.clone(),
                message: format!(
                    "index {} is above the largest writable index {}",
                    index, MAX_WRITE_INDEX
                ),
            }),
            None => Ok(()),
        }
    }

    /// Resolve the value at this path, `None` when any segment is missing
    pub fn get<'a>(&self, data: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(data, |node, segment| child(node, segment))
    }

    /// Resolve the value at this path starting from a top-level record
    pub fn lookup<'a>(&self, record: &'a Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let start = record.get(&first.key())?;
        rest.iter().try_fold(start, |node, segment| child(node, segment))
    }

    /// Whether a value exists at this path
    pub fn exists(&self, data: &Value) -> bool {
        self.get(data).is_some()
    }

    /// Write `value` at this path, creating intermediate containers as needed
    ///
    /// Paths rejected by [`FieldPath::check_writable`] fail before `data` is touched.
    pub fn set(&self, data: &mut Value, value: Value) -> Result<()> {
        self.check_writable()?;
        let Some((last, parents)) = self.segments.split_last() else {
            return Ok(());
        };

        let mut current = data;
        for (position, segment) in parents.iter().enumerate() {
            ensure_container(current, segment);
            current = child_slot(current, segment);
            // The next segment decides what kind of container this slot must hold
            ensure_container(current, &self.segments[position + 1]);
        }

        ensure_container(current, last);
        match current {
            Value::Object(map) => {
                map.insert(last.key(), value);
            }
            Value::Array(items) => {
                if let Segment::Index(index) = last {
                    pad_to(items, *index);
                    items[*index] = value;
                }
            }
            _ => unreachable!("ensure_container leaves an object or array"),
        }
        Ok(())
    }

    /// Remove and return the value at this path, `None` if nothing was there
    ///
    /// Object keys are removed preserving the order of the remaining keys;
    /// array elements are removed and later elements shift down.
    pub fn delete(&self, data: &mut Value) -> Option<Value> {
        let (last, parents) = self.segments.split_last()?;

        let mut current = data;
        for segment in parents {
            current = child_mut(current, segment)?;
        }

        match (current, last) {
            (Value::Object(map), segment) => map.shift_remove(&segment.key()),
            (Value::Array(items), Segment::Index(index)) if *index < items.len() => {
                Some(items.remove(*index))
            }
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for FieldPath {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

fn child<'a>(node: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (node, segment) {
        (Value::Object(map), segment) => map.get(&segment.key()),
        (Value::Array(items), Segment::Index(index)) => items.get(*index),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match (node, segment) {
        (Value::Object(map), segment) => map.get_mut(&segment.key()),
        (Value::Array(items), Segment::Index(index)) => items.get_mut(*index),
        _ => None,
    }
}

fn ensure_container(node: &mut Value, segment: &Segment) {
    if !segment.fits(node) {
        if !node.is_null() {
            tracing::trace!(segment = %segment, "replacing non-container value during write");
        }
        *node = segment.empty_container();
    }
}

/// Mutable slot for `segment` inside a container that already fits it
fn child_slot<'a>(node: &'a mut Value, segment: &Segment) -> &'a mut Value {
    match node {
        Value::Object(map) => map.entry(segment.key()).or_insert(Value::Null),
        Value::Array(items) => {
            let Segment::Index(index) = segment else {
                unreachable!("arrays only fit index segments");
            };
            pad_to(items, *index);
            &mut items[*index]
        }
        _ => unreachable!("ensure_container leaves an object or array"),
    }
}

fn pad_to(items: &mut Vec<Value>, index: usize) {
    if items.len() <= index {
        items.resize(index + 1, Value::Null);
    }
}

/// Resolve `path` against `data`
///
/// Unparsable paths resolve to `None`, like any other missing location.
pub fn get<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    FieldPath::parse(path).ok()?.get(data)
}

/// Write `value` at `path`, creating intermediate containers
pub fn set(data: &mut Value, path: &str, value: Value) -> Result<()> {
    FieldPath::parse(path)?.set(data, value)
}

/// Remove the value at `path`; a missing location is a no-op
pub fn delete(data: &mut Value, path: &str) -> Result<Option<Value>> {
    Ok(FieldPath::parse(path)?.delete(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_segments() {
        let path = FieldPath::parse("hobbies.0.name").unwrap();
        assert_eq!(
            path.segments(),
            &[
                Segment::Key("hobbies".to_string()),
                Segment::Index(0),
                Segment::Key("name".to_string()),
            ]
        );
        assert_eq!(path.to_string(), "hobbies.0.name");
    }

    #[test]
    fn test_parse_keeps_non_canonical_numbers_as_keys() {
        let path = FieldPath::parse("codes.007").unwrap();
        assert_eq!(path.segments()[1], Segment::Key("007".to_string()));
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("a..b").is_err());
        assert!(FieldPath::parse(".a").is_err());
        assert!(FieldPath::parse("a.").is_err());
    }

    #[test]
    fn test_get_nested() {
        let data = json!({"info": {"email": "mario@example.com"}, "tags": ["a", "b"]});
        assert_eq!(get(&data, "info.email"), Some(&json!("mario@example.com")));
        assert_eq!(get(&data, "tags.1"), Some(&json!("b")));
        assert_eq!(get(&data, "tags.5"), None);
        assert_eq!(get(&data, "info.missing.deep"), None);
        assert_eq!(get(&data, "info.email.domain"), None);
    }

    #[test]
    fn test_lookup_in_record() {
        let data = json!({"info": {"email": "e"}});
        let record = data.as_object().unwrap();
        let path = FieldPath::parse("info.email").unwrap();
        assert_eq!(path.lookup(record), Some(&json!("e")));
        assert_eq!(FieldPath::parse("info.phone").unwrap().lookup(record), None);
    }

    #[test]
    fn test_get_numeric_key_on_object() {
        let data = json!({"scores": {"1": "first"}});
        assert_eq!(get(&data, "scores.1"), Some(&json!("first")));
    }

    #[test]
    fn test_get_null_is_present() {
        let data = json!({"nickname": null});
        assert_eq!(get(&data, "nickname"), Some(&Value::Null));
    }

    #[test]
    fn test_set_creates_objects() {
        let mut data = json!({});
        set(&mut data, "address.street", json!("803 11th Avenue")).unwrap();
        assert_eq!(data, json!({"address": {"street": "803 11th Avenue"}}));
    }

    #[test]
    fn test_set_creates_arrays_for_numeric_segments() {
        let mut data = json!({});
        set(&mut data, "hobbies.0", json!("Golf")).unwrap();
        set(&mut data, "hobbies.2", json!("Tennis")).unwrap();
        assert_eq!(data, json!({"hobbies": ["Golf", null, "Tennis"]}));
    }

    #[test]
    fn test_set_numeric_segment_on_existing_object() {
        let mut data = json!({"scores": {}});
        set(&mut data, "scores.1", json!(10)).unwrap();
        assert_eq!(data, json!({"scores": {"1": 10}}));
    }

    #[test]
    fn test_set_replaces_scalar_in_the_way() {
        let mut data = json!({"info": "plain"});
        set(&mut data, "info.email", json!("x@y.z")).unwrap();
        assert_eq!(data, json!({"info": {"email": "x@y.z"}}));
    }

    #[test]
    fn test_set_overwrites_in_place_keeping_key_order() {
        let mut data = json!({"a": 1, "b": 2, "c": 3});
        set(&mut data, "b", json!(20)).unwrap();
        let keys: Vec<_> = data.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(data["b"], json!(20));
    }

    #[test]
    fn test_set_rejects_index_past_write_limit() {
        let mut data = json!({"a": 1});
        let err = set(&mut data, "list.18446744073709551615", json!(1)).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        assert!(set(&mut data, "list.70000.x", json!(1)).is_err());
        assert_eq!(data, json!({"a": 1}));
    }

    #[test]
    fn test_set_accepts_index_at_write_limit() {
        let mut data = json!({});
        let path = format!("list.{}", MAX_WRITE_INDEX);
        set(&mut data, &path, json!("last")).unwrap();
        assert_eq!(data["list"].as_array().unwrap().len(), MAX_WRITE_INDEX + 1);
        assert_eq!(get(&data, &path), Some(&json!("last")));
    }

    #[test]
    fn test_huge_index_reads_and_deletes_as_absent() {
        let mut data = json!({"list": [1, 2]});
        assert_eq!(get(&data, "list.18446744073709551615"), None);
        assert_eq!(delete(&mut data, "list.4000000000").unwrap(), None);
        assert_eq!(data, json!({"list": [1, 2]}));
    }

    #[test]
    fn test_delete_object_key_keeps_order() {
        let mut data = json!({"a": 1, "b": 2, "c": 3});
        assert_eq!(delete(&mut data, "a").unwrap(), Some(json!(1)));
        let keys: Vec<_> = data.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_delete_nested_and_array() {
        let mut data = json!({"info": {"email": "e", "twitter": "t"}, "list": [1, 2, 3]});
        delete(&mut data, "info.email").unwrap();
        delete(&mut data, "list.0").unwrap();
        assert_eq!(data, json!({"info": {"twitter": "t"}, "list": [2, 3]}));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut data = json!({"a": {"b": 1}});
        assert_eq!(delete(&mut data, "a.c").unwrap(), None);
        assert_eq!(delete(&mut data, "x.y.z").unwrap(), None);
        assert_eq!(delete(&mut data, "a.b.c").unwrap(), None);
        assert_eq!(data, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_invalid_path_errors() {
        let mut data = json!({});
        assert!(set(&mut data, "a..b", json!(1)).is_err());
        assert!(delete(&mut data, "").is_err());
        assert_eq!(get(&data, ""), None);
    }

    #[test]
    fn test_serde_as_string() {
        let path: FieldPath = serde_json::from_value(json!("info.email")).unwrap();
        assert_eq!(path.as_str(), "info.email");
        assert_eq!(serde_json::to_value(&path).unwrap(), json!("info.email"));
        assert!(serde_json::from_value::<FieldPath>(json!("a..b")).is_err());
    }
}
