//! Stream module
//!
//! The generic HTTP stream abstraction every concrete resource builds on.
//!
//! # Overview
//!
//! - `HttpStream` - request construction, pagination, and record extraction
//! - `IncrementalStream` - cursor field, state merging, checkpoint interval
//! - `compare_cursor_values` - ordering used to keep stream state monotonic

mod cursor;
mod traits;

pub use cursor::{compare_cursor_values, parse_cursor_timestamp, updated_cursor_state};
pub use traits::{extract_records, HttpStream, IncrementalStream};

#[cfg(test)]
mod tests;
