//! Authenticator implementation
//!
//! Handles applying the static API token to requests.

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use reqwest::header::HeaderValue;
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// Header the token is sent in
pub const AUTH_HEADER: &str = "Authorization";

/// Scheme placed before the token
pub const AUTH_METHOD: &str = "Bearer";

/// Attaches a static token to every request
pub struct TokenAuthenticator {
    token: SecretString,
}

impl TokenAuthenticator {
    /// Create a bearer authenticator for the given token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }

    /// Create an authenticator from the source configuration
    pub fn from_config(config: &SourceConfig) -> Self {
        Self::new(config.api_token().expose_secret().clone())
    }

    /// Build the sensitive header value
    pub fn header_value(&self) -> Result<HeaderValue> {
        let raw = format!("{AUTH_METHOD} {}", self.token.expose_secret());
        let mut value = HeaderValue::from_str(&raw)
            .map_err(|_| Error::auth("API token contains characters not allowed in a header"))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        Ok(req.header(AUTH_HEADER, self.header_value()?))
    }
}

impl std::fmt::Debug for TokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticator")
            .field("token", &"[REDACTED]")
            .finish()
    }
}
