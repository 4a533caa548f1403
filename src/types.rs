//! Common types used throughout the connector
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// One record, taken verbatim from a response page
pub type Record = JsonValue;

/// Per-stream checkpoint, keyed by cursor field name
pub type StreamState = JsonObject;

/// Partition key for one pass over a stream
pub type StreamSlice = JsonObject;

/// Opaque continuation marker returned by a stream's pagination logic
pub type PageToken = JsonObject;

// ============================================================================
// Sync Mode
// ============================================================================

/// Synchronization mode for streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Full refresh - fetch all data every time
    #[default]
    FullRefresh,
    /// Incremental - track the cursor and emit state
    Incremental,
}

impl std::str::FromStr for SyncMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "full_refresh" => Ok(Self::FullRefresh),
            "incremental" => Ok(Self::Incremental),
            other => Err(format!(
                "unknown sync mode '{other}' (expected full_refresh or incremental)"
            )),
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for connector messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Page-level progress
    Debug,
    /// Stream start and completion
    Info,
    /// Degraded but continuing read
    Warn,
}

impl LogLevel {
    /// Protocol name of the level
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_mode_serde() {
        let mode: SyncMode = serde_json::from_str("\"incremental\"").unwrap();
        assert_eq!(mode, SyncMode::Incremental);

        let json = serde_json::to_string(&SyncMode::FullRefresh).unwrap();
        assert_eq!(json, "\"full_refresh\"");
    }

    #[test]
    fn test_sync_mode_from_str() {
        assert_eq!("incremental".parse::<SyncMode>(), Ok(SyncMode::Incremental));
        assert_eq!("full_refresh".parse::<SyncMode>(), Ok(SyncMode::FullRefresh));
        assert!("append".parse::<SyncMode>().is_err());
    }

    #[test]
    fn test_log_level_names() {
        assert_eq!(LogLevel::Debug.as_str(), "DEBUG");
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Warn.as_str(), "WARN");
        assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"WARN\"");
    }
}
