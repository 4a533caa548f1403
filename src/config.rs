//! Source configuration
//!
//! The user supplies a flat JSON object. It is validated once, here, into a
//! typed [`SourceConfig`]; nothing downstream does key lookups on raw JSON.

use crate::error::{Error, Result, ResultExt};
use crate::types::JsonValue;
use secrecy::{ExposeSecret, SecretString};
use std::path::Path;

/// Default root for every dbt Cloud API request
pub const DEFAULT_BASE_URL: &str = "https://cloud.getdbt.com/api/";

/// Validated connector configuration
pub struct SourceConfig {
    /// API token used as the bearer credential
    api_token: SecretString,
    /// Target dbt Cloud account
    account_id: String,
    /// API root override (regional hosts, tests)
    base_url: Option<String>,
}

impl SourceConfig {
    /// Create a config from a token and an account id
    pub fn new(api_token: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            api_token: SecretString::new(api_token.into()),
            account_id: account_id.into(),
            base_url: None,
        }
    }

    /// Override the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(normalize_base_url(&base_url.into()));
        self
    }

    /// Validate a raw JSON configuration object
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::config("Configuration must be a JSON object"))?;

        let api_token = match obj.get("api_token") {
            None | Some(JsonValue::Null) => return Err(Error::missing_field("api_token")),
            Some(JsonValue::String(s)) if s.trim().is_empty() => {
                return Err(Error::invalid_value("api_token", "must not be empty"))
            }
            Some(JsonValue::String(s)) => s.clone(),
            Some(_) => return Err(Error::invalid_value("api_token", "must be a string")),
        };

        let account_id = match obj.get("account_id") {
            None | Some(JsonValue::Null) => return Err(Error::missing_field("account_id")),
            Some(JsonValue::String(s)) if s.trim().is_empty() => {
                return Err(Error::invalid_value("account_id", "must not be empty"))
            }
            Some(JsonValue::String(s)) => {
                let id = s.trim();
                if !id.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::invalid_value("account_id", "must contain only digits"));
                }
                id.to_string()
            }
            Some(JsonValue::Number(n)) if n.is_u64() => n.to_string(),
            Some(_) => {
                return Err(Error::invalid_value(
                    "account_id",
                    "must be a string or a non-negative integer",
                ))
            }
        };

        let base_url = match obj.get("base_url") {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) => {
                let normalized = normalize_base_url(s);
                url::Url::parse(&normalized)
                    .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
                Some(normalized)
            }
            Some(_) => return Err(Error::invalid_value("base_url", "must be a string")),
        };

        Ok(Self {
            api_token: SecretString::new(api_token),
            account_id,
            base_url,
        })
    }

    /// Parse and validate a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: JsonValue = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&contents)
    }

    /// The API token
    pub fn api_token(&self) -> &SecretString {
        &self.api_token
    }

    /// The account id, normalised to its decimal string form
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// API root, always ending with `/`
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.api_token.expose_secret().is_empty() {
            ""
        } else {
            "[REDACTED]"
        };
        f.debug_struct("SourceConfig")
            .field("api_token", &token)
            .field("account_id", &self.account_id)
            .field("base_url", &self.base_url())
            .finish()
    }
}

fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
