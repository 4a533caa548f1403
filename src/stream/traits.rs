//! Stream traits
//!
//! Defines the core stream abstractions driven by the sync engine.

use super::cursor::updated_cursor_state;
use crate::auth::TokenAuthenticator;
use crate::error::{Error, Result};
use crate::http::ApiResponse;
use crate::types::{JsonValue, PageToken, Record, StreamSlice, StreamState, StringMap};

/// One paginated HTTP resource
///
/// The engine calls these in a loop: `request_params` → GET
/// `url_base + path` → `parse_response` → `next_page_token`, until the
/// token is `None`.
pub trait HttpStream: Send + Sync {
    /// Stream name as shown to the user
    fn name(&self) -> &str;

    /// Root for every request issued by this stream
    fn url_base(&self) -> &str;

    /// Resource path relative to `url_base`
    fn path(&self, slice: Option<&StreamSlice>) -> String;

    /// Field that uniquely identifies a record
    fn primary_key(&self) -> Option<&str> {
        None
    }

    /// Authenticator applied to every request of this stream
    fn authenticator(&self) -> &TokenAuthenticator;

    /// Partitions to read; a single whole-resource pass by default
    fn stream_slices(&self, _state: &StreamState) -> Vec<Option<StreamSlice>> {
        vec![None]
    }

    /// Query parameters for one request
    fn request_params(
        &self,
        _state: &StreamState,
        _slice: Option<&StreamSlice>,
        _page_token: Option<&PageToken>,
    ) -> StringMap {
        StringMap::new()
    }

    /// Token for the next page, `None` when the read is complete
    ///
    /// The default never continues, so a read issues exactly one request per
    /// slice and anything past the first page is not fetched.
    fn next_page_token(&self, _response: &ApiResponse) -> Option<PageToken> {
        None
    }

    /// Records contained in one response page, in response order
    fn parse_response(&self, response: &ApiResponse) -> Result<Vec<Record>>;

    /// Incremental view of this stream, if it tracks a cursor
    fn as_incremental(&self) -> Option<&dyn IncrementalStream> {
        None
    }
}

/// A stream that tracks a cursor between syncs
pub trait IncrementalStream: HttpStream {
    /// Record attribute holding the sync position
    fn cursor_field(&self) -> &str;

    /// Emit state every N records instead of only at the end of the read
    fn state_checkpoint_interval(&self) -> Option<usize> {
        None
    }

    /// Fold one record into the stream state
    ///
    /// Keeps the greater of the stored cursor and the record's cursor.
    fn get_updated_state(&self, current: &StreamState, latest: &Record) -> StreamState {
        updated_cursor_state(self.cursor_field(), current, latest)
    }
}

/// Read the array stored under `key` in a JSON response body
pub fn extract_records(response: &ApiResponse, key: &str) -> Result<Vec<Record>> {
    let body: JsonValue = response.json()?;

    let JsonValue::Object(mut map) = body else {
        return Err(Error::record_extraction(
            key,
            "response body is not a JSON object",
        ));
    };

    match map.remove(key) {
        Some(JsonValue::Array(records)) => Ok(records),
        Some(other) => Err(Error::record_extraction(
            key,
            format!("expected an array, found {}", json_type_name(&other)),
        )),
        None => Err(Error::record_extraction(key, "key not present in response")),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
