// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamically-Typed Field Values
//!
//! [`FieldValue`] is the value vocabulary of an untyped input record: the
//! scalar, string, sequence and mapping shapes a generic message
//! deserializer can deliver. The JSON conversion rules mirror what the
//! transport's deserializer produces: integral numbers that fit `i32`
//! arrive as `Int`, wider integrals as `Long`, and every other number as
//! `Double` (floating-point input is never delivered as `Float`; narrowing
//! into a float field is the mapper's job).

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// A dynamically-typed value held by an input record
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    List(Vec<FieldValue>),
    Map(HashMap<String, FieldValue>),
    Null,
}

impl FieldValue {
    /// Convert a deserialized JSON value into a field value
    pub fn from_json(value: JsonValue) -> FieldValue {
        match value {
            JsonValue::Null => FieldValue::Null,
            JsonValue::Bool(b) => FieldValue::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    // Check if it fits in i32
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        FieldValue::Int(i as i32)
                    } else {
                        FieldValue::Long(i)
                    }
                } else {
                    FieldValue::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            JsonValue::String(s) => FieldValue::String(s),
            JsonValue::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from_json).collect())
            }
            JsonValue::Object(entries) => FieldValue::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, FieldValue::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Render back into the natural JSON shape
    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::String(s) => JsonValue::String(s.clone()),
            FieldValue::Int(i) => JsonValue::Number((*i).into()),
            FieldValue::Long(l) => JsonValue::Number((*l).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f as f64)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            FieldValue::Double(d) => serde_json::Number::from_f64(*d)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            FieldValue::Bool(b) => JsonValue::Bool(*b),
            FieldValue::List(items) => {
                JsonValue::Array(items.iter().map(FieldValue::to_json).collect())
            }
            FieldValue::Map(entries) => JsonValue::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
            FieldValue::Null => JsonValue::Null,
        }
    }

    /// Name of this value's runtime shape, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Int(_) => "int",
            FieldValue::Long(_) => "long",
            FieldValue::Float(_) => "float",
            FieldValue::Double(_) => "double",
            FieldValue::Bool(_) => "bool",
            FieldValue::List(_) => "list",
            FieldValue::Map(_) => "map",
            FieldValue::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Floating-point numbers arrive from the deserializer as `Double`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, FieldValue>> {
        match self {
            FieldValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(FieldValue::from_json)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Long(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Double(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        FieldValue::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_number_buckets() {
        assert_eq!(
            FieldValue::from_json(serde_json::json!(42)),
            FieldValue::Int(42)
        );
        assert_eq!(
            FieldValue::from_json(serde_json::json!(5_000_000_000i64)),
            FieldValue::Long(5_000_000_000)
        );
        assert_eq!(
            FieldValue::from_json(serde_json::json!(-73.5)),
            FieldValue::Double(-73.5)
        );
    }

    #[test]
    fn test_from_json_containers_recurse() {
        let value = FieldValue::from_json(serde_json::json!({
            "keywords": ["pizza", "italian"],
            "count": 2
        }));
        let entries = value.as_map().unwrap();
        assert_eq!(
            entries.get("keywords"),
            Some(&FieldValue::List(vec!["pizza".into(), "italian".into()]))
        );
        assert_eq!(entries.get("count"), Some(&FieldValue::Int(2)));
    }

    #[test]
    fn test_from_json_null() {
        assert!(FieldValue::from_json(serde_json::json!(null)).is_null());
    }

    #[test]
    fn test_accessors_are_shape_strict() {
        assert_eq!(FieldValue::Double(1.5).as_f64(), Some(1.5));
        assert_eq!(FieldValue::Int(1).as_f64(), None);
        assert_eq!(FieldValue::Int(7).as_i64(), None);
        assert_eq!(FieldValue::Long(7).as_i64(), Some(7));
    }

    #[test]
    fn test_serde_round_trip_uses_natural_json() {
        let value = FieldValue::List(vec![FieldValue::Int(1), "two".into()]);
        let encoded = serde_json::to_string(&value).unwrap();
        assert_eq!(encoded, r#"[1,"two"]"#);
        let decoded: FieldValue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(FieldValue::Double(0.0).type_name(), "double");
        assert_eq!(FieldValue::Null.type_name(), "null");
        assert_eq!(FieldValue::List(vec![]).type_name(), "list");
    }
}
