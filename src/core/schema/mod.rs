// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarative Target Schema
//!
//! The target record's shape is described by an explicit field-descriptor
//! table built once at startup: wire name, semantic kind, modifiers, and an
//! assignment function. The conversion passes resolve fields by name
//! against this table, which gives the same by-name matching behavior as
//! runtime field introspection with the dispatch decided at compile time.

use crate::core::error::AssignmentError;
use crate::core::record::FieldValue;
use std::fmt;

/// Semantic type of a declared target field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Bool,
    Enum,
    List,
    Map,
    /// A nested type assembled from several input keys (or, for
    /// transport-scoped types, never assembled at all). Identified by the
    /// nested type's name.
    Composite(&'static str),
}

impl FieldKind {
    /// Numeric, boolean and character scalar kinds
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            FieldKind::Byte
                | FieldKind::Short
                | FieldKind::Int
                | FieldKind::Long
                | FieldKind::Float
                | FieldKind::Double
                | FieldKind::Char
                | FieldKind::Bool
        )
    }

    pub const fn is_enum(&self) -> bool {
        matches!(self, FieldKind::Enum)
    }

    pub const fn is_composite(&self) -> bool {
        matches!(self, FieldKind::Composite(_))
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Byte => write!(f, "byte"),
            FieldKind::Short => write!(f, "short"),
            FieldKind::Int => write!(f, "int"),
            FieldKind::Long => write!(f, "long"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::Double => write!(f, "double"),
            FieldKind::Char => write!(f, "char"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Enum => write!(f, "enum"),
            FieldKind::List => write!(f, "list"),
            FieldKind::Map => write!(f, "map"),
            FieldKind::Composite(name) => write!(f, "{}", name),
        }
    }
}

/// Assignment restrictions on a declared field.
///
/// A `constant` field keeps the value it was constructed with; a
/// `process_wide` field is backed by process-global state. Neither is ever
/// a target for assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldModifiers {
    pub constant: bool,
    pub process_wide: bool,
}

impl FieldModifiers {
    pub const NONE: FieldModifiers = FieldModifiers {
        constant: false,
        process_wide: false,
    };

    pub const CONSTANT: FieldModifiers = FieldModifiers {
        constant: true,
        process_wide: false,
    };

    pub const PROCESS_WIDE: FieldModifiers = FieldModifiers {
        constant: false,
        process_wide: true,
    };

    pub const fn is_assignable(&self) -> bool {
        !self.constant && !self.process_wide
    }
}

/// Assignment function installed on a descriptor. Receives the consumed
/// value and either stores it on the record or reports the shape mismatch.
pub type AssignFn<R> = fn(&mut R, FieldValue) -> Result<(), AssignmentError>;

/// One declared field of the target record
pub struct FieldDescriptor<R> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub modifiers: FieldModifiers,
    pub assign: AssignFn<R>,
}

impl<R> FieldDescriptor<R> {
    pub fn new(name: &'static str, kind: FieldKind, assign: AssignFn<R>) -> Self {
        Self {
            name,
            kind,
            modifiers: FieldModifiers::NONE,
            assign,
        }
    }

    pub fn with_modifiers(mut self, modifiers: FieldModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

impl<R> Clone for FieldDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            modifiers: self.modifiers,
            assign: self.assign,
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("modifiers", &self.modifiers)
            .finish()
    }
}

/// The fixed, ordered set of declared fields for a target record type
pub struct TargetSchema<R> {
    fields: Vec<FieldDescriptor<R>>,
}

impl<R> TargetSchema<R> {
    /// Build the schema table. Duplicate names resolve to the first entry
    /// and are logged as a warning.
    pub fn new(fields: Vec<FieldDescriptor<R>>) -> Self {
        for (index, field) in fields.iter().enumerate() {
            if fields[..index].iter().any(|other| other.name == field.name) {
                log::warn!("duplicate field '{}' in target schema", field.name);
            }
        }
        Self { fields }
    }

    /// Look up a declared field by its exact wire name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<R>> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn fields(&self) -> &[FieldDescriptor<R>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R> fmt::Debug for TargetSchema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetSchema")
            .field("fields", &self.fields)
            .finish()
    }
}
