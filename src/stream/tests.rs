//! Tests for the stream module

use super::*;
use crate::auth::TokenAuthenticator;
use crate::error::{Error, Result};
use crate::http::ApiResponse;
use crate::types::{JsonValue, Record, StreamSlice, StreamState};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cmp::Ordering;
use test_case::test_case;

/// Minimal stream relying on every default
struct FixtureStream {
    auth: TokenAuthenticator,
}

impl FixtureStream {
    fn new() -> Self {
        Self {
            auth: TokenAuthenticator::new("tok"),
        }
    }
}

impl HttpStream for FixtureStream {
    fn name(&self) -> &str {
        "fixture"
    }

    fn url_base(&self) -> &str {
        "https://example.com/api/"
    }

    fn path(&self, _slice: Option<&StreamSlice>) -> String {
        "v1/items".to_string()
    }

    fn authenticator(&self) -> &TokenAuthenticator {
        &self.auth
    }

    fn parse_response(&self, response: &ApiResponse) -> Result<Vec<Record>> {
        extract_records(response, "items")
    }

    fn as_incremental(&self) -> Option<&dyn IncrementalStream> {
        Some(self)
    }
}

impl IncrementalStream for FixtureStream {
    fn cursor_field(&self) -> &str {
        "updated_at"
    }
}

fn state(value: JsonValue) -> StreamState {
    value.as_object().cloned().unwrap()
}

// ============================================================================
// Record Extraction
// ============================================================================

#[test]
fn test_extract_records_in_order() {
    let response = ApiResponse::new(
        200,
        r#"{"data":[{"project_id":1,"updated_at":"2022-01-01"},{"project_id":2,"updated_at":"2022-02-01"}]}"#,
    );

    let records = extract_records(&response, "data").unwrap();

    assert_eq!(
        records,
        vec![
            json!({"project_id": 1, "updated_at": "2022-01-01"}),
            json!({"project_id": 2, "updated_at": "2022-02-01"}),
        ]
    );
}

#[test]
fn test_extract_records_empty_array() {
    let response = ApiResponse::new(200, r#"{"data": []}"#);
    assert!(extract_records(&response, "data").unwrap().is_empty());
}

#[test]
fn test_extract_records_keeps_non_object_elements() {
    let response = ApiResponse::new(200, r#"{"data": [1, "two", null]}"#);
    let records = extract_records(&response, "data").unwrap();
    assert_eq!(records, vec![json!(1), json!("two"), JsonValue::Null]);
}

#[test]
fn test_extract_records_missing_key() {
    let response = ApiResponse::new(200, r#"{"status": {"code": 200}}"#);
    let err = extract_records(&response, "data").unwrap_err();
    assert!(matches!(err, Error::RecordExtraction { ref path, .. } if path == "data"));
}

#[test]
fn test_extract_records_not_array() {
    let response = ApiResponse::new(200, r#"{"data": {"id": 1}}"#);
    let err = extract_records(&response, "data").unwrap_err();
    assert!(err.to_string().contains("expected an array, found object"));

    let response = ApiResponse::new(200, r"[1, 2]");
    let err = extract_records(&response, "data").unwrap_err();
    assert!(err.to_string().contains("not a JSON object"));
}

#[test]
fn test_extract_records_invalid_json() {
    let response = ApiResponse::new(200, "<html>oops</html>");
    let err = extract_records(&response, "data").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// Trait Defaults
// ============================================================================

#[test]
fn test_default_next_page_token_is_none() {
    let stream = FixtureStream::new();
    let full_page = ApiResponse::new(
        200,
        r#"{"items": [{"id": 1}], "next": "page-2", "extra": {"pagination": {"total_count": 500}}}"#,
    );

    assert!(stream.next_page_token(&full_page).is_none());
    assert!(stream.next_page_token(&ApiResponse::new(200, "")).is_none());
}

#[test]
fn test_default_request_params_empty() {
    let stream = FixtureStream::new();
    let stored = state(json!({"updated_at": "2022-01-01"}));
    let slice = state(json!({"parent": 1}));
    let token = state(json!({"offset": 100}));

    assert!(stream
        .request_params(&StreamState::new(), None, None)
        .is_empty());
    assert!(stream
        .request_params(&stored, Some(&slice), Some(&token))
        .is_empty());
}

#[test]
fn test_default_slices_single_pass() {
    let stream = FixtureStream::new();
    assert_eq!(stream.stream_slices(&StreamState::new()), vec![None]);
    assert!(stream.primary_key().is_none());
}

#[test]
fn test_default_checkpoint_interval_unset() {
    let stream = FixtureStream::new();
    assert!(stream.state_checkpoint_interval().is_none());
    assert_eq!(
        stream.as_incremental().map(|s| s.cursor_field()),
        Some("updated_at")
    );
}

// ============================================================================
// State Merging
// ============================================================================

#[test]
fn test_get_updated_state_advances() {
    let stream = FixtureStream::new();
    let current = state(json!({"updated_at": "2022-01-01"}));
    let latest = json!({"updated_at": "2022-03-01", "project_id": 1});

    assert_eq!(
        stream.get_updated_state(&current, &latest),
        state(json!({"updated_at": "2022-03-01"}))
    );
}

#[test]
fn test_get_updated_state_never_regresses() {
    let stream = FixtureStream::new();
    let current = state(json!({"updated_at": "2022-03-01"}));
    let older = json!({"updated_at": "2022-01-01", "project_id": 2});

    assert_eq!(stream.get_updated_state(&current, &older), current);
}

#[test]
fn test_get_updated_state_from_empty() {
    let stream = FixtureStream::new();
    let latest = json!({"updated_at": "2022-02-01"});

    assert_eq!(
        stream.get_updated_state(&StreamState::new(), &latest),
        state(json!({"updated_at": "2022-02-01"}))
    );
}

#[test]
fn test_get_updated_state_record_without_cursor() {
    let stream = FixtureStream::new();
    let current = state(json!({"updated_at": "2022-01-01"}));

    assert_eq!(stream.get_updated_state(&current, &json!({"id": 1})), current);
    assert_eq!(
        stream.get_updated_state(&current, &json!({"updated_at": null})),
        current
    );
    assert!(stream
        .get_updated_state(&StreamState::new(), &json!({"id": 1}))
        .is_empty());
}

#[test]
fn test_get_updated_state_drops_foreign_keys() {
    let current = state(json!({"updated_at": "2022-01-01", "stale": true}));
    let updated = updated_cursor_state("updated_at", &current, &json!({"updated_at": "2022-01-02"}));
    assert_eq!(updated, state(json!({"updated_at": "2022-01-02"})));
}

#[test]
fn test_get_updated_state_fold_over_page() {
    let stream = FixtureStream::new();
    let records = [
        json!({"updated_at": "2022-02-01"}),
        json!({"updated_at": "2022-05-01T08:00:00Z"}),
        json!({"updated_at": "2022-04-30"}),
    ];

    let folded = records.iter().fold(StreamState::new(), |acc, record| {
        stream.get_updated_state(&acc, record)
    });

    assert_eq!(folded, state(json!({"updated_at": "2022-05-01T08:00:00Z"})));
}

// ============================================================================
// Cursor Comparison
// ============================================================================

#[test_case(json!(1), json!(2), Some(Ordering::Less) ; "integers")]
#[test_case(json!(10), json!(9.5), Some(Ordering::Greater) ; "mixed numbers")]
#[test_case(json!("2022-01-01"), json!("2022-03-01"), Some(Ordering::Less) ; "dates")]
#[test_case(json!("2022-01-01T12:00:00Z"), json!("2022-01-01T13:00:00+02:00"), Some(Ordering::Greater) ; "rfc3339 with offsets")]
#[test_case(json!("2022-01-01 10:00:00.123456+00:00"), json!("2022-01-01 09:59:59+00:00"), Some(Ordering::Greater) ; "space separated timestamps")]
#[test_case(json!("2022-01-02"), json!("2022-01-01T23:59:59"), Some(Ordering::Greater) ; "date against naive datetime")]
#[test_case(json!("abc"), json!("abd"), Some(Ordering::Less) ; "plain strings")]
#[test_case(json!("zzz"), json!("2022-01-01"), None ; "garbage against timestamp")]
#[test_case(json!("2022-01-01"), json!("not-a-date"), None ; "timestamp against garbage")]
#[test_case(json!("2022-01-01"), json!(5), None ; "string against number")]
#[test_case(json!(true), json!(false), None ; "booleans unordered")]
fn test_compare_cursor_values(a: JsonValue, b: JsonValue, expected: Option<Ordering>) {
    assert_eq!(compare_cursor_values(&a, &b), expected);
}

#[test]
fn test_unordered_values_keep_stored_cursor() {
    let current = state(json!({"updated_at": "2022-01-01"}));
    let updated = updated_cursor_state("updated_at", &current, &json!({"updated_at": 99}));
    assert_eq!(updated, current);
}

#[test]
fn test_unparseable_cursor_does_not_replace_timestamp() {
    let current = state(json!({"updated_at": "2022-01-01T00:00:00+00:00"}));
    let updated = updated_cursor_state("updated_at", &current, &json!({"updated_at": "zzz"}));
    assert_eq!(updated, current);
}

#[test]
fn test_parse_cursor_timestamp_formats() {
    assert!(parse_cursor_timestamp("2022-01-01").is_some());
    assert!(parse_cursor_timestamp("2022-01-01T10:11:12").is_some());
    assert!(parse_cursor_timestamp("2022-01-01T10:11:12.5Z").is_some());
    assert!(parse_cursor_timestamp("yesterday").is_none());
}
