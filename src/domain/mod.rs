// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Ad Request Domain Types
//!
//! The typed record a conversion produces, plus its nested composites. Wire
//! names are camelCase (the serde renames match the keys the queue payloads
//! carry), struct fields are snake_case.

pub mod mapping;

pub use self::mapping::{ad_request_converter, AD_REQUEST_SCHEMA};

use crate::core::record::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use thiserror::Error;

/// Current layout revision of the ad request record
pub const SCHEMA_VERSION: i32 = 1;

/// A geographic coordinate pair.
///
/// Constructed as (longitude, latitude) from the `lng` and `lat` keys, in
/// that order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// The publisher a request is served for, with optional category hints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub name: String,
    pub category_for_publisher: Option<String>,
    pub category_for_placement: Option<String>,
}

impl Publisher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category_for_publisher: None,
            category_for_placement: None,
        }
    }
}

/// A keyword collection with an optional reported count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub keywords: Vec<String>,
    pub count: i32,
}

/// Serving channel the request originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Web,
    Mobile,
    InStore,
}

impl Channel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Channel::Web => "WEB",
            Channel::Mobile => "MOBILE",
            Channel::InStore => "IN_STORE",
        }
    }
}

/// Channel name that matches no variant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown channel '{0}'")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEB" => Ok(Channel::Web),
            "MOBILE" => Ok(Channel::Mobile),
            "IN_STORE" => Ok(Channel::InStore),
            other => Err(UnknownChannel(other.to_string())),
        }
    }
}

/// Transport-scoped request context.
///
/// Belongs to the HTTP layer; the mapper's deny-list keeps it out of the
/// conversion entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpContext {
    pub remote_addr: Option<String>,
    pub headers: HashMap<String, String>,
}

/// The typed ad request assembled from a queue payload.
///
/// Fields not covered by the payload keep their defaults; `schema_version`
/// is fixed at construction and never reassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdRequest {
    pub request_id: String,
    pub ad_unit: String,
    pub channel: Option<Channel>,
    pub radius: f32,
    pub limit: i32,
    pub timestamp: i64,
    pub debug: bool,
    pub tags: Vec<String>,
    pub extensions: HashMap<String, FieldValue>,
    pub point: Option<GeoPoint>,
    pub publisher: Option<Publisher>,
    pub keywords: Option<KeywordSet>,
    pub http_context: Option<HttpContext>,
    pub schema_version: i32,
}

impl Default for AdRequest {
    fn default() -> Self {
        Self {
            request_id: String::new(),
            ad_unit: String::new(),
            channel: None,
            radius: 0.0,
            limit: 0,
            timestamp: 0,
            debug: false,
            tags: Vec::new(),
            extensions: HashMap::new(),
            point: None,
            publisher: None,
            keywords: None,
            http_context: None,
            schema_version: SCHEMA_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_from_str() {
        assert_eq!("WEB".parse::<Channel>(), Ok(Channel::Web));
        assert_eq!("IN_STORE".parse::<Channel>(), Ok(Channel::InStore));
        assert_eq!(
            "zeppelin".parse::<Channel>(),
            Err(UnknownChannel("zeppelin".to_string()))
        );
    }

    #[test]
    fn test_default_request_carries_schema_version() {
        let request = AdRequest::default();
        assert_eq!(request.schema_version, SCHEMA_VERSION);
        assert_eq!(request.point, None);
        assert_eq!(request.radius, 0.0);
    }

    #[test]
    fn test_request_serializes_with_wire_names() {
        let request = AdRequest {
            request_id: "r-1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""requestId":"r-1""#));
        assert!(json.contains(r#""schemaVersion":1"#));
    }

    #[test]
    fn test_point_construction_order() {
        let point = GeoPoint::new(-73.5, 40.7);
        assert_eq!(point.longitude, -73.5);
        assert_eq!(point.latitude, 40.7);
    }
}
