// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic Field Mapper
//!
//! The pass that runs after the composite builders: a single linear walk
//! over a snapshot of the remaining input keys, matching each key against a
//! declared field by exact name and assigning when the field is eligible.
//! Success and failure are per-key; one bad key never affects another.
//!
//! The only coercion performed here is the narrowing of a double-precision
//! arrival into a float-declared field. Nothing widens and integers never
//! become floats; any other mismatch surfaces from the assignment function
//! and is recorded as an isolated failure.

use crate::core::convert::{ConversionReport, TypePolicy};
use crate::core::error::FieldSkip;
use crate::core::record::{FieldValue, InputRecord};
use crate::core::schema::{FieldKind, TargetSchema};

/// Map every remaining input key onto the target record. Eligible keys are
/// drained; ineligible keys stay in the record for the caller to observe.
pub fn map_remaining<R>(
    input: &mut InputRecord,
    target: &mut R,
    schema: &TargetSchema<R>,
    policy: &TypePolicy,
    report: &mut ConversionReport,
) {
    for key in input.key_snapshot() {
        let descriptor = match schema.field(&key) {
            Some(descriptor) => descriptor,
            None => {
                report.record(FieldSkip::field_not_found(&key));
                continue;
            }
        };

        if !descriptor.modifiers.is_assignable() || !policy.permits(descriptor.kind) {
            report.record(FieldSkip::assignment_denied(&key));
            continue;
        }

        let Some(value) = input.remove(&key) else {
            continue;
        };
        let value = match (descriptor.kind, value) {
            // The one coercion: double-precision input narrowed into a
            // float-declared field.
            (FieldKind::Float, FieldValue::Double(d)) => FieldValue::Float(d as f32),
            (_, value) => value,
        };

        if let Err(error) = (descriptor.assign)(target, value) {
            report.record(FieldSkip::assignment_failed(&key, error));
        }
    }
}
