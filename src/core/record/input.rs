// SPDX-License-Identifier: MIT OR Apache-2.0

//! Untyped Input Records
//!
//! [`InputRecord`] is the flat key-value record handed over by the
//! transport's deserializer. It is mutable by design: the conversion passes
//! remove each key as they consume it, so a key is mapped at most once and
//! whatever is left after a conversion is exactly the unmapped remainder.

use crate::core::error::{AdMapError, AdMapResult};
use crate::core::record::FieldValue;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// A flat, untyped key-value record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecord {
    entries: HashMap<String, FieldValue>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build a record from a deserialized JSON value. The root must be an
    /// object; anything else is a malformed payload.
    pub fn from_json_value(value: JsonValue) -> AdMapResult<Self> {
        match value {
            JsonValue::Object(entries) => Ok(entries
                .into_iter()
                .map(|(key, value)| (key, FieldValue::from_json(value)))
                .collect()),
            other => Err(AdMapError::malformed_payload(format!(
                "payload root must be a JSON object, got {}",
                json_shape(&other)
            ))),
        }
    }

    /// Build a record from raw JSON bytes
    pub fn from_json_slice(input: &[u8]) -> AdMapResult<Self> {
        let value: JsonValue = serde_json::from_slice(input).map_err(|e| {
            AdMapError::malformed_payload_with_source(
                format!("JSON parse error: {}", e),
                Box::new(e),
            )
        })?;
        Self::from_json_value(value)
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.get(key)
    }

    /// Remove and return a key's value. Consuming a key this way is what
    /// keeps it out of every later pass.
    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.entries.remove(key)
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

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Sorted copy of the current key set. Passes iterate the snapshot, not
    /// the live map, so consuming keys mid-iteration is safe and the visit
    /// order is deterministic.
    pub fn key_snapshot(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl From<HashMap<String, FieldValue>> for InputRecord {
    fn from(entries: HashMap<String, FieldValue>) -> Self {
        Self { entries }
    }
}

impl FromIterator<(String, FieldValue)> for InputRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn json_shape(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
