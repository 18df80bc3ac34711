// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core Error Types
//!
//! The conversion path never fails as a whole: every per-field condition is
//! recovered locally and surfaced as a [`FieldSkip`] in the conversion
//! report. [`AdMapError`] covers the one genuinely fallible operation in the
//! crate, turning a raw payload into an [`InputRecord`].
//!
//! [`InputRecord`]: crate::core::record::InputRecord

use thiserror::Error;

/// Result type for fallible admap operations
pub type AdMapResult<T> = Result<T, AdMapError>;

/// Crate-level errors
#[derive(Error, Debug)]
pub enum AdMapError {
    #[error("Malformed payload: {message}")]
    MalformedPayload {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AdMapError {
    /// Create a malformed payload error
    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            source: None,
        }
    }

    /// Create a malformed payload error with the underlying parse error
    pub fn malformed_payload_with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::MalformedPayload {
            message: message.into(),
            source: Some(source),
        }
    }
}

/// Why the generic pass could not assign a value to a field.
///
/// Produced by a descriptor's assignment function when the value's runtime
/// shape does not match the field's declared type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, got {actual}")]
pub struct AssignmentError {
    pub expected: &'static str,
    pub actual: String,
}

impl AssignmentError {
    pub fn new(expected: &'static str, actual: impl Into<String>) -> Self {
        Self {
            expected,
            actual: actual.into(),
        }
    }
}

/// Per-field conversion diagnostic
///
/// One entry per skipped field or key. Skips never abort the conversion;
/// they are collected into the report so callers and tests can assert on
/// exactly what was left out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldSkip {
    /// No target field with the key's name exists on the schema.
    #[error("property not found: '{field}'")]
    FieldNotFound { field: String },

    /// The field exists but is not eligible for direct assignment
    /// (constant, process-wide, or blocked by the type policy). This is the
    /// expected routing case for composite and transport-scoped fields, not
    /// an error.
    #[error("field '{field}' is not eligible for direct assignment")]
    AssignmentDenied { field: String },

    /// The field is eligible but the value's shape did not match.
    #[error("assignment to field '{field}' failed: expected {expected}, got {actual}")]
    AssignmentFailed {
        field: String,
        expected: &'static str,
        actual: String,
    },

    /// A composite builder's required key was absent or null.
    #[error("composite field '{field}' is missing required key '{key}'")]
    MissingCompositeKey { field: String, key: &'static str },

    /// A composite builder drained its keys but one value had the wrong
    /// shape; the whole group is skipped.
    #[error("composite field '{field}' received malformed key '{key}': expected {expected}, got {actual}")]
    MalformedCompositeKey {
        field: String,
        key: &'static str,
        expected: &'static str,
        actual: String,
    },
}

impl FieldSkip {
    /// Create a field-not-found skip
    pub fn field_not_found(field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
        }
    }

    /// Create an assignment-denied skip
    pub fn assignment_denied(field: impl Into<String>) -> Self {
        Self::AssignmentDenied {
            field: field.into(),
        }
    }

    /// Create an assignment-failed skip from the assignment error
    pub fn assignment_failed(field: impl Into<String>, error: AssignmentError) -> Self {
        Self::AssignmentFailed {
            field: field.into(),
            expected: error.expected,
            actual: error.actual,
        }
    }

    /// Create a missing-composite-key skip
    pub fn missing_composite_key(field: impl Into<String>, key: &'static str) -> Self {
        Self::MissingCompositeKey {
            field: field.into(),
            key,
        }
    }

    /// Create a malformed-composite-key skip
    pub fn malformed_composite_key(
        field: impl Into<String>,
        key: &'static str,
        expected: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        Self::MalformedCompositeKey {
            field: field.into(),
            key,
            expected,
            actual: actual.into(),
        }
    }

    /// The target field this skip refers to
    pub fn field(&self) -> &str {
        match self {
            Self::FieldNotFound { field }
            | Self::AssignmentDenied { field }
            | Self::AssignmentFailed { field, .. }
            | Self::MissingCompositeKey { field, .. }
            | Self::MalformedCompositeKey { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_payload_error() {
        let error = AdMapError::malformed_payload("root must be an object");
        assert!(matches!(error, AdMapError::MalformedPayload { .. }));
        assert!(error.to_string().contains("root must be an object"));
    }

    #[test]
    fn test_assignment_failed_carries_shapes() {
        let skip = FieldSkip::assignment_failed("limit", AssignmentError::new("int", "string"));
        assert_eq!(skip.field(), "limit");
        assert_eq!(
            skip.to_string(),
            "assignment to field 'limit' failed: expected int, got string"
        );
    }

    #[test]
    fn test_missing_composite_key_message() {
        let skip = FieldSkip::missing_composite_key("point", "lat");
        assert_eq!(
            skip.to_string(),
            "composite field 'point' is missing required key 'lat'"
        );
    }

    #[test]
    fn test_field_accessor() {
        assert_eq!(FieldSkip::field_not_found("wat").field(), "wat");
        assert_eq!(
            FieldSkip::assignment_denied("httpContext").field(),
            "httpContext"
        );
    }
}
