//! Source trait and connector specification
//!
//! Defines the `Source` trait a connector implements, the connection check
//! result and the connector specification shown to users.

use crate::config::SourceConfig;
use crate::error::Result;
use crate::stream::HttpStream;
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// Connector Spec (for UI)
// ============================================================================

/// Connector specification returned by `spec()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorSpec {
    /// Where the connector is documented
    pub documentation_url: String,

    /// JSON schema of the configuration
    pub connection_specification: JsonValue,
}

impl ConnectorSpec {
    /// Parse a specification from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Configuration keys the schema marks as required
    pub fn required_fields(&self) -> Vec<&str> {
        self.connection_specification
            .get("required")
            .and_then(JsonValue::as_array)
            .map(|fields| fields.iter().filter_map(JsonValue::as_str).collect())
            .unwrap_or_default()
    }
}

// ============================================================================
// Check Result
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Source Trait
// ============================================================================

/// Core trait a source connector implements
#[async_trait]
pub trait Source: Send + Sync {
    /// Stream type handed to the read driver
    type Stream: HttpStream;

    /// Returns the connector specification
    fn spec(&self) -> Result<ConnectorSpec>;

    /// Tests whether the configuration can reach the API.
    ///
    /// Failures are reported in the result, never as an `Err`.
    async fn check_connection(&self, config: &SourceConfig) -> CheckResult;

    /// Streams exposed for this configuration
    fn streams(&self, config: &Arc<SourceConfig>) -> Vec<Self::Stream>;
}
