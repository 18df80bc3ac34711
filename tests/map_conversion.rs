// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end conversion coverage: composite key groups, generic scalar
//! mapping, policy routing, and the permissiveness contract (per-key
//! failures never abort a conversion).

use admap::core::convert::policy::HTTP_CONTEXT;
use admap::domain::{ad_request_converter, Channel, GeoPoint};
use admap::{FieldKind, FieldSkip, FieldValue, InputRecord, TypePolicy};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn scenario_a_composites_built_from_key_groups() {
    init_logs();
    let mut input = InputRecord::new();
    input.insert("lng", -73.5);
    input.insert("lat", 40.7);
    input.insert("name", "Acme");
    input.insert("categoryForPublisher", "retail");
    input.insert("categoryForPlacement", "storefront");

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.point, Some(GeoPoint::new(-73.5, 40.7)));
    let publisher = request.publisher.expect("publisher built");
    assert_eq!(publisher.name, "Acme");
    assert_eq!(publisher.category_for_publisher.as_deref(), Some("retail"));
    assert_eq!(
        publisher.category_for_placement.as_deref(),
        Some("storefront")
    );
    assert!(input.is_empty());
    // The only skip is the keyword group, whose required key never arrived
    assert_eq!(
        report.skipped(),
        &[FieldSkip::missing_composite_key("keywords", "keywords")]
    );
}

#[test]
fn scenario_b_keywords_with_count() {
    let mut input = InputRecord::new();
    input.insert(
        "keywords",
        FieldValue::List(vec!["pizza".into(), "italian".into()]),
    );
    input.insert("count", 2);

    let request = ad_request_converter().convert(&mut input);

    let set = request.keywords.expect("keyword set built");
    assert_eq!(set.keywords, vec!["pizza", "italian"]);
    assert_eq!(set.count, 2);
    assert!(input.is_empty());
}

#[test]
fn scenario_c_keywords_without_count_defaults_to_zero() {
    let mut input = InputRecord::new();
    input.insert("keywords", FieldValue::List(vec!["pizza".into()]));

    let request = ad_request_converter().convert(&mut input);

    let set = request.keywords.expect("keyword set built");
    assert_eq!(set.keywords, vec!["pizza"]);
    assert_eq!(set.count, 0);
    assert!(input.is_empty());
}

#[test]
fn scenario_d_denied_http_context_left_unmapped() {
    let mut input = InputRecord::new();
    input.insert("httpContext", FieldValue::Map(Default::default()));
    input.insert("requestId", "r-1");

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.http_context, None);
    assert_eq!(request.request_id, "r-1");
    // Ineligible keys are not drained; the caller can still observe them
    assert!(input.contains_key("httpContext"));
    assert!(report
        .skipped()
        .iter()
        .any(|skip| matches!(skip, FieldSkip::AssignmentDenied { field } if field == "httpContext")));
}

#[test]
fn scenario_e_double_narrows_into_float_radius() {
    let mut input = InputRecord::new();
    input.insert("radius", 2.5f64);

    let request = ad_request_converter().convert(&mut input);

    assert_eq!(request.radius, 2.5f32);
    assert!(input.is_empty());
}

#[test]
fn scalar_only_payload_is_fully_drained() {
    let mut input = InputRecord::new();
    input.insert("requestId", "r-42");
    input.insert("adUnit", "sidebar");
    input.insert("channel", "MOBILE");
    input.insert("radius", 1.5f64);
    input.insert("limit", 25);
    input.insert("timestamp", 1_700_000_000_000i64);
    input.insert("debug", true);
    input.insert("tags", FieldValue::List(vec!["food".into(), "local".into()]));
    let mut extensions = std::collections::HashMap::new();
    extensions.insert("abTest".to_string(), FieldValue::String("b".to_string()));
    input.insert("extensions", FieldValue::Map(extensions));

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.request_id, "r-42");
    assert_eq!(request.ad_unit, "sidebar");
    assert_eq!(request.channel, Some(Channel::Mobile));
    assert_eq!(request.radius, 1.5f32);
    assert_eq!(request.limit, 25);
    assert_eq!(request.timestamp, 1_700_000_000_000);
    assert!(request.debug);
    assert_eq!(request.tags, vec!["food", "local"]);
    assert_eq!(
        request.extensions.get("abTest"),
        Some(&FieldValue::String("b".to_string()))
    );
    assert!(input.is_empty());
    // Only the three composite groups report their keys as absent
    assert!(report
        .skipped()
        .iter()
        .all(|skip| matches!(skip, FieldSkip::MissingCompositeKey { .. })));
}

#[test]
fn missing_latitude_builds_nothing_and_consumes_nothing() {
    init_logs();
    let mut input = InputRecord::new();
    input.insert("lng", -73.5);

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.point, None);
    assert!(input.contains_key("lng"));
    assert!(report
        .skipped()
        .contains(&FieldSkip::missing_composite_key("point", "lat")));
    // The leftover half then falls through to the generic pass, which has
    // no field named 'lng'
    assert!(report
        .skipped()
        .contains(&FieldSkip::field_not_found("lng")));
}

#[test]
fn null_latitude_counts_as_absent() {
    let mut input = InputRecord::new();
    input.insert("lng", -73.5);
    input.insert("lat", FieldValue::Null);

    let request = ad_request_converter().convert(&mut input);

    assert_eq!(request.point, None);
    assert!(input.contains_key("lng"));
    assert!(input.contains_key("lat"));
}

#[test]
fn malformed_longitude_fails_group_after_drain() {
    let mut input = InputRecord::new();
    input.insert("lng", "west");
    input.insert("lat", 40.7);

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.point, None);
    assert!(!input.contains_key("lng"));
    assert!(!input.contains_key("lat"));
    assert!(report
        .skipped()
        .contains(&FieldSkip::malformed_composite_key(
            "point", "lng", "double", "string"
        )));
}

#[test]
fn malformed_keyword_count_fails_group() {
    let mut input = InputRecord::new();
    input.insert("keywords", FieldValue::List(vec!["pizza".into()]));
    input.insert("count", "two");

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.keywords, None);
    assert!(input.is_empty());
    assert!(report
        .skipped()
        .contains(&FieldSkip::malformed_composite_key(
            "keywords", "count", "int", "string"
        )));
}

#[test]
fn publisher_without_name_leaves_optionals_untouched() {
    let mut input = InputRecord::new();
    input.insert("categoryForPublisher", "retail");

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.publisher, None);
    assert!(input.contains_key("categoryForPublisher"));
    assert!(report
        .skipped()
        .contains(&FieldSkip::missing_composite_key("publisher", "name")));
}

#[test]
fn unknown_keys_are_ignored_and_isolated() {
    init_logs();
    let mut input = InputRecord::new();
    input.insert("wat", 9);
    input.insert("limit", 10);

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.limit, 10);
    assert!(input.contains_key("wat"));
    assert!(report.skipped().contains(&FieldSkip::field_not_found("wat")));
}

#[test]
fn conversion_is_deterministic_across_fresh_records() {
    let payload = br#"{"lng": -73.5, "lat": 40.7, "name": "Acme", "limit": 10, "wat": true}"#;

    let mut first_input = InputRecord::from_json_slice(payload).unwrap();
    let mut second_input = InputRecord::from_json_slice(payload).unwrap();

    let converter = ad_request_converter();
    let (first, first_report) = converter.convert_with_report(&mut first_input);
    let (second, second_report) = converter.convert_with_report(&mut second_input);

    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
}

#[test]
fn deny_list_wins_over_allow_list() {
    let policy = TypePolicy::default().with_denied_types(vec![FieldKind::Int, HTTP_CONTEXT]);
    // Int stays on the allow-list; the deny-list still rejects it
    assert!(policy.allowed_types().contains(&FieldKind::Int));

    let mut input = InputRecord::new();
    input.insert("limit", 10);

    let (request, report) = ad_request_converter()
        .with_policy(policy)
        .convert_with_report(&mut input);

    assert_eq!(request.limit, 0);
    assert!(input.contains_key("limit"));
    assert!(report
        .skipped()
        .contains(&FieldSkip::assignment_denied("limit")));
}

#[test]
fn constant_schema_version_is_never_reassigned() {
    let mut input = InputRecord::new();
    input.insert("schemaVersion", 99);

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.schema_version, 1);
    assert!(input.contains_key("schemaVersion"));
    assert!(report
        .skipped()
        .contains(&FieldSkip::assignment_denied("schemaVersion")));
}

#[test]
fn unparseable_channel_is_isolated_assignment_failure() {
    let mut input = InputRecord::new();
    input.insert("channel", "ZEPPELIN");
    input.insert("requestId", "r-1");

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.channel, None);
    assert_eq!(request.request_id, "r-1");
    // Eligible keys are drained before the assignment is attempted
    assert!(!input.contains_key("channel"));
    assert!(report
        .skipped()
        .iter()
        .any(|skip| matches!(skip, FieldSkip::AssignmentFailed { field, .. } if field == "channel")));
}

#[test]
fn long_field_rejects_int_arrival() {
    // Narrowing is the only coercion; an int never widens into a long field
    let mut input = InputRecord::new();
    input.insert("timestamp", 5);

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.timestamp, 0);
    assert!(report
        .skipped()
        .iter()
        .any(|skip| matches!(skip, FieldSkip::AssignmentFailed { field, .. } if field == "timestamp")));
}

#[test]
fn json_payload_end_to_end() {
    init_logs();
    let payload = br#"{
        "lng": -73.5, "lat": 40.7,
        "name": "Acme", "categoryForPublisher": "retail",
        "keywords": ["pizza", "italian"], "count": 2,
        "requestId": "r-1", "radius": 0.25, "limit": 10, "debug": false
    }"#;
    let mut input = InputRecord::from_json_slice(payload).unwrap();

    let (request, report) = ad_request_converter().convert_with_report(&mut input);

    assert_eq!(request.point, Some(GeoPoint::new(-73.5, 40.7)));
    let publisher = request.publisher.expect("publisher built");
    assert_eq!(publisher.name, "Acme");
    assert_eq!(publisher.category_for_publisher.as_deref(), Some("retail"));
    assert_eq!(publisher.category_for_placement, None);
    let set = request.keywords.expect("keyword set built");
    assert_eq!(set.keywords, vec!["pizza", "italian"]);
    assert_eq!(set.count, 2);
    assert_eq!(request.request_id, "r-1");
    assert_eq!(request.radius, 0.25f32);
    assert_eq!(request.limit, 10);
    assert!(!request.debug);
    assert!(input.is_empty());
    assert!(report.is_clean());
}
