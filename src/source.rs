//! dbt Cloud source
//!
//! Entry point tying configuration, connection check and streams together.

use crate::auth::TokenAuthenticator;
use crate::config::SourceConfig;
use crate::connector::{CheckResult, ConnectorSpec, Source};
use crate::error::{Error, Result};
use crate::http::{join_url, HttpClient, RequestConfig};
use crate::streams::{Projects, SourceStream};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

const SPEC_YAML: &str = include_str!("spec.yaml");

/// dbt Cloud source connector
#[derive(Debug, Clone)]
pub struct SourceDbtCloud {
    client: HttpClient,
}

impl SourceDbtCloud {
    /// Create a source with a default HTTP client
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: HttpClient::new()?,
        })
    }

    /// Create a source around an existing HTTP client
    pub fn with_client(client: HttpClient) -> Self {
        Self { client }
    }

    /// HTTP client used for the connection check
    pub fn client(&self) -> &HttpClient {
        &self.client
    }
}

/// Account-info endpoint, relative to the API root
fn account_path(account_id: &str) -> String {
    format!("v2/accounts/{account_id}/")
}

/// `status.user_message` of a dbt Cloud error body
fn user_message(body: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(body).ok()?;
    value
        .get("status")?
        .get("user_message")?
        .as_str()
        .map(String::from)
}

fn check_failure(error: &Error) -> CheckResult {
    match error {
        Error::HttpStatus { status, body } => match user_message(body) {
            Some(message) => CheckResult::failure(format!(
                "Unable to connect to dbt Cloud API with the provided configuration - {message}"
            )),
            None => CheckResult::failure(format!(
                "Unable to connect to dbt Cloud API with the provided configuration - HTTP {status}"
            )),
        },
        other => CheckResult::failure(format!("Unable to connect to dbt Cloud API: {other}")),
    }
}

#[async_trait]
impl Source for SourceDbtCloud {
    type Stream = SourceStream;

    fn spec(&self) -> Result<ConnectorSpec> {
        ConnectorSpec::from_yaml(SPEC_YAML)
    }

    async fn check_connection(&self, config: &SourceConfig) -> CheckResult {
        let url = match join_url(config.base_url(), &account_path(config.account_id())) {
            Ok(url) => url,
            Err(e) => return check_failure(&e),
        };
        let authenticator = TokenAuthenticator::from_config(config);

        info!(account_id = %config.account_id(), "Checking connection");

        match self
            .client
            .get(&url, RequestConfig::new(), Some(&authenticator))
            .await
        {
            Ok(response) => {
                debug!(status = response.status, "Connection check succeeded");
                CheckResult::success()
            }
            Err(e) => {
                warn!(error = %e, "Connection check failed");
                check_failure(&e)
            }
        }
    }

    fn streams(&self, config: &Arc<SourceConfig>) -> Vec<SourceStream> {
        let authenticator = Arc::new(TokenAuthenticator::from_config(config));
        vec![Projects::new(Arc::clone(config), authenticator).into()]
    }
}
