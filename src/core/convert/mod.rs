// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Record Conversion Engine
//!
//! Turns an untyped [`InputRecord`] into a typed target record in two
//! passes:
//!
//! 1. **Composite builders** — each installed [`CompositeSpec`] drains its
//!    group of input keys and assembles one nested value. Running first
//!    lets the builders claim their keys before the generic pass sees them.
//! 2. **Generic pass** — the remaining keys are matched by name against the
//!    schema table and assigned when the [`TypePolicy`] permits the field's
//!    kind.
//!
//! ## Permissiveness Contract
//!
//! `convert` never fails and never panics: unknown keys, denied kinds,
//! missing composite halves and mismatched values each degrade to a missing
//! field on the output record. Every such skip is collected into the
//! [`ConversionReport`] (and mirrored to the log where the condition is
//! unexpected), so callers can assert on exactly what was left out.
//!
//! ## Concurrency
//!
//! A converter instance holds only immutable configuration and can be
//! shared across threads; each conversion call owns its input and output
//! records and completes synchronously.

pub mod composite;
pub mod generic;
pub mod policy;

pub use self::composite::{build_composite, CompositeSpec};
pub use self::generic::map_remaining;
pub use self::policy::TypePolicy;

use crate::core::error::FieldSkip;
use crate::core::record::InputRecord;
use crate::core::schema::TargetSchema;
use std::fmt;
use std::sync::Arc;

/// Structured list of everything a conversion skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    skipped: Vec<FieldSkip>,
}

impl ConversionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one skip. Mirrors the skip to the log: unexpected conditions
    /// at `error`, missing composite halves at `debug`, and nothing for
    /// assignment-denied (the expected routing case).
    pub fn record(&mut self, skip: FieldSkip) {
        match &skip {
            FieldSkip::FieldNotFound { .. }
            | FieldSkip::AssignmentFailed { .. }
            | FieldSkip::MalformedCompositeKey { .. } => log::error!("{}", skip),
            FieldSkip::MissingCompositeKey { .. } => log::debug!("{}", skip),
            FieldSkip::AssignmentDenied { .. } => {}
        }
        self.skipped.push(skip);
    }

    /// Everything skipped, in the order it was encountered
    pub fn skipped(&self) -> &[FieldSkip] {
        &self.skipped
    }

    /// True when nothing was skipped
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    /// True when some skip refers to the given field
    pub fn contains_field(&self, field: &str) -> bool {
        self.skipped.iter().any(|skip| skip.field() == field)
    }
}

/// The conversion engine: schema table, composite specs and type policy
pub struct MapConverter<R> {
    schema: Arc<TargetSchema<R>>,
    specs: Vec<Box<dyn CompositeSpec<R>>>,
    policy: TypePolicy,
}

impl<R: Default> MapConverter<R> {
    /// Create a converter with the default type policy. Specs run in the
    /// order given, before the generic pass.
    pub fn new(schema: Arc<TargetSchema<R>>, specs: Vec<Box<dyn CompositeSpec<R>>>) -> Self {
        Self {
            schema,
            specs,
            policy: TypePolicy::default(),
        }
    }

    /// Replace the type policy
    pub fn with_policy(mut self, policy: TypePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &TypePolicy {
        &self.policy
    }

    pub fn schema(&self) -> &TargetSchema<R> {
        &self.schema
    }

    /// Convert the record, discarding the report. The input record is
    /// drained of every key that was consumed; whatever remains is the
    /// unmapped remainder.
    pub fn convert(&self, input: &mut InputRecord) -> R {
        self.convert_with_report(input).0
    }

    /// Convert the record and return what was skipped alongside it
    pub fn convert_with_report(&self, input: &mut InputRecord) -> (R, ConversionReport) {
        let mut target = R::default();
        let mut report = ConversionReport::new();

        for spec in &self.specs {
            build_composite(spec.as_ref(), input, &mut target, &self.schema, &mut report);
        }
        map_remaining(input, &mut target, &self.schema, &self.policy, &mut report);

        (target, report)
    }
}

impl<R> fmt::Debug for MapConverter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapConverter")
            .field("schema", &self.schema)
            .field("specs", &self.specs)
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_starts_clean() {
        let report = ConversionReport::new();
        assert!(report.is_clean());
        assert!(report.is_empty());
        assert_eq!(report.skipped(), &[]);
    }

    #[test]
    fn test_report_preserves_order_and_fields() {
        let mut report = ConversionReport::new();
        report.record(FieldSkip::field_not_found("wat"));
        report.record(FieldSkip::assignment_denied("httpContext"));
        assert_eq!(report.len(), 2);
        assert!(report.contains_field("wat"));
        assert!(report.contains_field("httpContext"));
        assert!(!report.contains_field("limit"));
        assert_eq!(report.skipped()[0].field(), "wat");
    }
}
