// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ad Request Mapping Table
//!
//! The declarative schema for [`AdRequest`] — one descriptor per declared
//! field — plus the three composite specs and the wired-up converter. The
//! table is built once and shared; descriptor order follows the struct.
//!
//! Composite kinds are not on the policy's allow-list, so their keys only
//! ever reach the record through the specs below. `httpContext` is
//! deny-listed outright and `schemaVersion` carries the constant modifier:
//! neither is ever assigned from a payload.

use super::{AdRequest, Channel, GeoPoint, KeywordSet, Publisher};
use crate::core::convert::policy::HTTP_CONTEXT;
use crate::core::convert::{CompositeSpec, MapConverter};
use crate::core::error::{AssignmentError, FieldSkip};
use crate::core::record::FieldValue;
use crate::core::schema::{FieldDescriptor, FieldKind, FieldModifiers, TargetSchema};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Composite kind of the coordinate pair field
pub const GEO_POINT: FieldKind = FieldKind::Composite("GeoPoint");
/// Composite kind of the publisher entity field
pub const PUBLISHER: FieldKind = FieldKind::Composite("Publisher");
/// Composite kind of the keyword collection field
pub const KEYWORD_SET: FieldKind = FieldKind::Composite("KeywordSet");

/// Descriptor table for [`AdRequest`], built once at first use
pub static AD_REQUEST_SCHEMA: Lazy<Arc<TargetSchema<AdRequest>>> = Lazy::new(|| {
    Arc::new(TargetSchema::new(vec![
        FieldDescriptor::new("requestId", FieldKind::String, |target, value| {
            target.request_id = take_string(value)?;
            Ok(())
        }),
        FieldDescriptor::new("adUnit", FieldKind::String, |target, value| {
            target.ad_unit = take_string(value)?;
            Ok(())
        }),
        FieldDescriptor::new("channel", FieldKind::Enum, |target, value| {
            target.channel = Some(take_channel(value)?);
            Ok(())
        }),
        FieldDescriptor::new("radius", FieldKind::Float, |target, value| {
            target.radius = take_f32(value)?;
            Ok(())
        }),
        FieldDescriptor::new("limit", FieldKind::Int, |target, value| {
            target.limit = take_i32(value)?;
            Ok(())
        }),
        FieldDescriptor::new("timestamp", FieldKind::Long, |target, value| {
            target.timestamp = take_i64(value)?;
            Ok(())
        }),
        FieldDescriptor::new("debug", FieldKind::Bool, |target, value| {
            target.debug = take_bool(value)?;
            Ok(())
        }),
        FieldDescriptor::new("tags", FieldKind::List, |target, value| {
            target.tags = take_string_list(value)?;
            Ok(())
        }),
        FieldDescriptor::new("extensions", FieldKind::Map, |target, value| {
            target.extensions = take_map(value)?;
            Ok(())
        }),
        FieldDescriptor::new("point", GEO_POINT, |_, value| {
            Err(AssignmentError::new("GeoPoint", value.type_name()))
        }),
        FieldDescriptor::new("publisher", PUBLISHER, |_, value| {
            Err(AssignmentError::new("Publisher", value.type_name()))
        }),
        FieldDescriptor::new("keywords", KEYWORD_SET, |_, value| {
            Err(AssignmentError::new("KeywordSet", value.type_name()))
        }),
        FieldDescriptor::new("httpContext", HTTP_CONTEXT, |_, value| {
            Err(AssignmentError::new("HttpContext", value.type_name()))
        }),
        FieldDescriptor::new("schemaVersion", FieldKind::Int, |target: &mut AdRequest, value| {
            target.schema_version = take_i32(value)?;
            Ok(())
        })
        .with_modifiers(FieldModifiers::CONSTANT),
    ]))
});

/// A fully wired converter for [`AdRequest`] with the default type policy
pub fn ad_request_converter() -> MapConverter<AdRequest> {
    MapConverter::new(
        Arc::clone(&AD_REQUEST_SCHEMA),
        vec![
            Box::new(GeoPointSpec),
            Box::new(PublisherSpec),
            Box::new(KeywordSetSpec),
        ],
    )
}

/// Coordinate pair from `lng` and `lat`.
///
/// Both keys must be present and non-null or the field is left unset;
/// longitude is read first and the point is constructed as
/// (longitude, latitude).
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoPointSpec;

impl CompositeSpec<AdRequest> for GeoPointSpec {
    fn field(&self) -> &'static str {
        "point"
    }

    fn expected_kind(&self) -> FieldKind {
        GEO_POINT
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["lng", "lat"]
    }

    fn construct(
        &self,
        required: &[FieldValue],
        _optional: &[Option<FieldValue>],
        target: &mut AdRequest,
    ) -> Result<(), FieldSkip> {
        let [lng_value, lat_value] = required else {
            return Err(FieldSkip::missing_composite_key("point", "lng"));
        };
        let longitude = lng_value.as_f64().ok_or_else(|| {
            FieldSkip::malformed_composite_key("point", "lng", "double", lng_value.type_name())
        })?;
        let latitude = lat_value.as_f64().ok_or_else(|| {
            FieldSkip::malformed_composite_key("point", "lat", "double", lat_value.type_name())
        })?;
        target.point = Some(GeoPoint::new(longitude, latitude));
        Ok(())
    }
}

/// Publisher entity from `name` plus two optional category keys
#[derive(Debug, Clone, Copy, Default)]
pub struct PublisherSpec;

impl CompositeSpec<AdRequest> for PublisherSpec {
    fn field(&self) -> &'static str {
        "publisher"
    }

    fn expected_kind(&self) -> FieldKind {
        PUBLISHER
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["name"]
    }

    fn optional_keys(&self) -> &'static [&'static str] {
        &["categoryForPublisher", "categoryForPlacement"]
    }

    fn construct(
        &self,
        required: &[FieldValue],
        optional: &[Option<FieldValue>],
        target: &mut AdRequest,
    ) -> Result<(), FieldSkip> {
        let [name_value] = required else {
            return Err(FieldSkip::missing_composite_key("publisher", "name"));
        };
        let [for_publisher, for_placement] = optional else {
            return Err(FieldSkip::missing_composite_key("publisher", "name"));
        };
        let name = name_value.as_str().ok_or_else(|| {
            FieldSkip::malformed_composite_key("publisher", "name", "string", name_value.type_name())
        })?;

        let mut publisher = Publisher::new(name);
        if let Some(value) = for_publisher {
            publisher.category_for_publisher = Some(
                value
                    .as_str()
                    .ok_or_else(|| {
                        FieldSkip::malformed_composite_key(
                            "publisher",
                            "categoryForPublisher",
                            "string",
                            value.type_name(),
                        )
                    })?
                    .to_string(),
            );
        }
        if let Some(value) = for_placement {
            publisher.category_for_placement = Some(
                value
                    .as_str()
                    .ok_or_else(|| {
                        FieldSkip::malformed_composite_key(
                            "publisher",
                            "categoryForPlacement",
                            "string",
                            value.type_name(),
                        )
                    })?
                    .to_string(),
            );
        }
        target.publisher = Some(publisher);
        Ok(())
    }
}

/// Keyword collection from `keywords` plus an optional `count`
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSetSpec;

impl CompositeSpec<AdRequest> for KeywordSetSpec {
    fn field(&self) -> &'static str {
        "keywords"
    }

    fn expected_kind(&self) -> FieldKind {
        KEYWORD_SET
    }

    fn required_keys(&self) -> &'static [&'static str] {
        &["keywords"]
    }

    fn optional_keys(&self) -> &'static [&'static str] {
        &["count"]
    }

    fn construct(
        &self,
        required: &[FieldValue],
        optional: &[Option<FieldValue>],
        target: &mut AdRequest,
    ) -> Result<(), FieldSkip> {
        let [keywords_value] = required else {
            return Err(FieldSkip::missing_composite_key("keywords", "keywords"));
        };
        let items = keywords_value.as_list().ok_or_else(|| {
            FieldSkip::malformed_composite_key(
                "keywords",
                "keywords",
                "list",
                keywords_value.type_name(),
            )
        })?;
        let keywords = items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    FieldSkip::malformed_composite_key(
                        "keywords",
                        "keywords",
                        "string element",
                        item.type_name(),
                    )
                })
            })
            .collect::<Result<Vec<String>, FieldSkip>>()?;

        let mut set = KeywordSet { keywords, count: 0 };
        if let Some(value) = optional.first().and_then(Option::as_ref) {
            set.count = value.as_i32().ok_or_else(|| {
                FieldSkip::malformed_composite_key("keywords", "count", "int", value.type_name())
            })?;
        }
        target.keywords = Some(set);
        Ok(())
    }
}

fn take_string(value: FieldValue) -> Result<String, AssignmentError> {
    match value {
        FieldValue::String(s) => Ok(s),
        other => Err(AssignmentError::new("string", other.type_name())),
    }
}

fn take_i32(value: FieldValue) -> Result<i32, AssignmentError> {
    match value {
        FieldValue::Int(i) => Ok(i),
        other => Err(AssignmentError::new("int", other.type_name())),
    }
}

fn take_i64(value: FieldValue) -> Result<i64, AssignmentError> {
    match value {
        FieldValue::Long(l) => Ok(l),
        other => Err(AssignmentError::new("long", other.type_name())),
    }
}

fn take_f32(value: FieldValue) -> Result<f32, AssignmentError> {
    match value {
        FieldValue::Float(f) => Ok(f),
        other => Err(AssignmentError::new("float", other.type_name())),
    }
}

fn take_bool(value: FieldValue) -> Result<bool, AssignmentError> {
    match value {
        FieldValue::Bool(b) => Ok(b),
        other => Err(AssignmentError::new("bool", other.type_name())),
    }
}

fn take_channel(value: FieldValue) -> Result<Channel, AssignmentError> {
    match value {
        FieldValue::String(s) => s
            .parse::<Channel>()
            .map_err(|e| AssignmentError::new("channel name", format!("'{}'", e.0))),
        other => Err(AssignmentError::new("channel name", other.type_name())),
    }
}

fn take_string_list(value: FieldValue) -> Result<Vec<String>, AssignmentError> {
    match value {
        FieldValue::List(items) => items
            .into_iter()
            .map(|item| match item {
                FieldValue::String(s) => Ok(s),
                other => Err(AssignmentError::new("string element", other.type_name())),
            })
            .collect(),
        other => Err(AssignmentError::new("list", other.type_name())),
    }
}

fn take_map(value: FieldValue) -> Result<HashMap<String, FieldValue>, AssignmentError> {
    match value {
        FieldValue::Map(entries) => Ok(entries),
        other => Err(AssignmentError::new("map", other.type_name())),
    }
}
