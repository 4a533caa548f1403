//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs.

use crate::types::StreamState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete state for the source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream state
    #[serde(default)]
    pub streams: HashMap<String, StreamState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.streams.get(stream)
    }

    /// Replace the state of a stream
    pub fn set_stream(&mut self, stream: &str, state: StreamState) {
        self.streams.insert(stream.to_string(), state);
    }
}
