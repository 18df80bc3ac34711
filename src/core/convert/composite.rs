// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composite Field Builders
//!
//! A composite field is assembled from several input keys rather than
//! copied from one. Each [`CompositeSpec`] names the target field, the
//! field's expected kind, the keys it consumes, and the construction rule;
//! the shared driver applies the same best-effort algorithm to every spec:
//!
//! 1. Verify the named field exists on the schema with the expected kind.
//! 2. Verify every required key is present and non-null before touching the
//!    record. A missing half of a required group leaves the record exactly
//!    as it was.
//! 3. Drain required keys in declared order, then optional keys (a
//!    present-but-null optional is drained and treated as absent).
//! 4. Run the construction rule. A malformed value fails the whole group:
//!    the field stays at its default, the drained keys stay consumed.
//!
//! The driver never returns an error; every failure is recorded on the
//! report and the conversion moves on to the next spec.

use crate::core::convert::ConversionReport;
use crate::core::error::FieldSkip;
use crate::core::record::{FieldValue, InputRecord};
use crate::core::schema::{FieldKind, TargetSchema};
use std::fmt::Debug;

/// One composite field: which keys it drains and how they combine
pub trait CompositeSpec<R>: Debug + Send + Sync {
    /// Wire name of the target field this spec populates
    fn field(&self) -> &'static str;

    /// Declared kind the target field must have
    fn expected_kind(&self) -> FieldKind;

    /// Keys that must all be present and non-null for the group to build
    fn required_keys(&self) -> &'static [&'static str];

    /// Keys consumed when present, absent otherwise
    fn optional_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Combine the drained values into the nested value and store it.
    /// `required` holds one value per required key in declared order;
    /// `optional` holds one entry per optional key in declared order.
    fn construct(
        &self,
        required: &[FieldValue],
        optional: &[Option<FieldValue>],
        target: &mut R,
    ) -> Result<(), FieldSkip>;
}

/// Run one spec against the input record. Mutates the record (key removal)
/// and the target (field assignment); never raises.
pub fn build_composite<R>(
    spec: &dyn CompositeSpec<R>,
    input: &mut InputRecord,
    target: &mut R,
    schema: &TargetSchema<R>,
    report: &mut ConversionReport,
) {
    let field = spec.field();
    match schema.field(field) {
        Some(descriptor) if descriptor.kind == spec.expected_kind() => {}
        _ => {
            report.record(FieldSkip::field_not_found(field));
            return;
        }
    }

    for &key in spec.required_keys() {
        match input.get(key) {
            Some(value) if !value.is_null() => {}
            _ => {
                report.record(FieldSkip::missing_composite_key(field, key));
                return;
            }
        }
    }

    let required: Vec<FieldValue> = spec
        .required_keys()
        .iter()
        .filter_map(|key| input.remove(key))
        .collect();
    let optional: Vec<Option<FieldValue>> = spec
        .optional_keys()
        .iter()
        .map(|key| input.remove(key).filter(|value| !value.is_null()))
        .collect();

    if let Err(skip) = spec.construct(&required, &optional, target) {
        report.record(skip);
    }
}
