// SPDX-License-Identifier: MIT OR Apache-2.0

//! # admap
//!
//! Converts an untyped, flat key-value record (the shape a generic JSON
//! message deserializer hands over after a queue hop) into a strongly-typed
//! [`AdRequest`](domain::AdRequest), driven by a declarative field-descriptor
//! table instead of runtime reflection.
//!
//! ## Conversion Pipeline
//!
//! 1. **Composite builders** run first. Each one drains a fixed group of
//!    input keys and assembles one nested value (a coordinate pair, a
//!    publisher entity, a keyword set), removing the keys it consumed so the
//!    generic pass never sees them.
//! 2. The **generic field mapper** walks the remaining keys, matches each
//!    against a declared target field by name, checks the field against the
//!    type policy's allow/deny lists, and assigns.
//!
//! The mapper is deliberately permissive: every per-key failure (unknown
//! key, denied type, bad value) is recovered locally, logged where the
//! condition is unexpected, and collected into a
//! [`ConversionReport`](core::convert::ConversionReport). The conversion
//! itself always returns a record.
//!
//! ## Example
//!
//! ```
//! use admap::domain::ad_request_converter;
//! use admap::InputRecord;
//!
//! let payload = br#"{"lng": -73.5, "lat": 40.7, "name": "Acme", "limit": 10}"#;
//! let mut record = InputRecord::from_json_slice(payload).unwrap();
//!
//! let request = ad_request_converter().convert(&mut record);
//!
//! assert_eq!(request.limit, 10);
//! let point = request.point.unwrap();
//! assert_eq!(point.longitude, -73.5);
//! assert_eq!(point.latitude, 40.7);
//! assert_eq!(request.publisher.unwrap().name, "Acme");
//! ```
//!
//! ## Thread Safety
//!
//! A [`MapConverter`] holds only immutable configuration (the schema table,
//! the composite specs, the type policy) and is `Send + Sync`. Any number of
//! threads may run independent conversions through one shared converter;
//! each call owns its own input and output records.

pub mod core;
pub mod domain;

pub use crate::core::convert::{
    CompositeSpec, ConversionReport, MapConverter, TypePolicy,
};
pub use crate::core::error::{AdMapError, AdMapResult, AssignmentError, FieldSkip};
pub use crate::core::record::{FieldValue, InputRecord};
pub use crate::core::schema::{FieldDescriptor, FieldKind, FieldModifiers, TargetSchema};
