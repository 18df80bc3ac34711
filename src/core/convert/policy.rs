// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type Eligibility Policy
//!
//! The allow-list/deny-list pair gating direct field assignment. A kind
//! passes the allow test if it is an enumerated type, a primitive, or
//! explicitly listed; a kind on the deny-list is rejected no matter what.
//! Composite kinds are deliberately absent from the default allow-list —
//! that absence is what routes them to the composite builders instead of
//! the generic pass.
//!
//! The policy is an immutable value: it is injected when the converter is
//! built and never changes afterwards, so conversions running on other
//! threads can share it freely. "Replacing a list" means building a new
//! policy (and a new converter) via [`TypePolicy::with_allowed_types`] /
//! [`TypePolicy::with_denied_types`].

use crate::core::schema::FieldKind;

/// Composite kind of transport request-context values. These belong to the
/// HTTP layer, not the typed record, so the default deny-list rejects them.
pub const HTTP_CONTEXT: FieldKind = FieldKind::Composite("HttpContext");

/// Allow-list / deny-list over declared field kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePolicy {
    allowed: Vec<FieldKind>,
    denied: Vec<FieldKind>,
}

impl TypePolicy {
    pub fn new(allowed: Vec<FieldKind>, denied: Vec<FieldKind>) -> Self {
        Self { allowed, denied }
    }

    /// Kinds eligible for direct assignment
    pub fn allowed_types(&self) -> &[FieldKind] {
        &self.allowed
    }

    /// Kinds rejected regardless of the allow-list
    pub fn denied_types(&self) -> &[FieldKind] {
        &self.denied
    }

    /// Replace the allow-list wholesale
    pub fn with_allowed_types(mut self, allowed: Vec<FieldKind>) -> Self {
        self.allowed = allowed;
        self
    }

    /// Replace the deny-list wholesale
    pub fn with_denied_types(mut self, denied: Vec<FieldKind>) -> Self {
        self.denied = denied;
        self
    }

    pub fn is_denied(&self, kind: FieldKind) -> bool {
        self.denied.contains(&kind)
    }

    pub fn is_allowed(&self, kind: FieldKind) -> bool {
        kind.is_enum() || kind.is_primitive() || self.allowed.contains(&kind)
    }

    /// Full eligibility test: the deny-list always wins
    pub fn permits(&self, kind: FieldKind) -> bool {
        !self.is_denied(kind) && self.is_allowed(kind)
    }
}

impl Default for TypePolicy {
    fn default() -> Self {
        Self {
            allowed: vec![
                FieldKind::String,
                FieldKind::Byte,
                FieldKind::Short,
                FieldKind::Int,
                FieldKind::Long,
                FieldKind::Float,
                FieldKind::Double,
                FieldKind::Char,
                FieldKind::Bool,
                FieldKind::List,
                FieldKind::Map,
            ],
            denied: vec![HTTP_CONTEXT],
        }
    }
}
