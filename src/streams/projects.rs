//! Account projects stream

use super::DbtCloudStream;
use crate::auth::TokenAuthenticator;
use crate::config::SourceConfig;
use crate::error::Result;
use crate::http::ApiResponse;
use crate::stream::{HttpStream, IncrementalStream};
use crate::types::{Record, StreamSlice};
use std::sync::Arc;

/// `GET v2/accounts/{account_id}/projects`
#[derive(Debug, Clone)]
pub struct Projects {
    base: DbtCloudStream,
}

impl Projects {
    /// Stream name
    pub const NAME: &'static str = "projects";
    /// Primary key field
    pub const PRIMARY_KEY: &'static str = "project_id";
    /// Cursor field
    pub const CURSOR_FIELD: &'static str = "updated_at";

    /// Create the stream
    pub fn new(config: Arc<SourceConfig>, authenticator: Arc<TokenAuthenticator>) -> Self {
        Self {
            base: DbtCloudStream::new(config, authenticator),
        }
    }

    /// Account the projects belong to
    pub fn account_id(&self) -> &str {
        self.base.account_id()
    }
}

impl HttpStream for Projects {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn url_base(&self) -> &str {
        self.base.url_base()
    }

    fn path(&self, _slice: Option<&StreamSlice>) -> String {
        format!("v2/accounts/{}/projects", self.account_id())
    }

    fn primary_key(&self) -> Option<&str> {
        Some(Self::PRIMARY_KEY)
    }

    fn authenticator(&self) -> &TokenAuthenticator {
        self.base.authenticator()
    }

    // TODO: follow `extra.pagination` (offset/limit) once the projects
    // endpoint's paging contract is confirmed; reads stop after one page.

    fn parse_response(&self, response: &ApiResponse) -> Result<Vec<Record>> {
        self.base.parse_response(response)
    }

    fn as_incremental(&self) -> Option<&dyn IncrementalStream> {
        Some(self)
    }
}

impl IncrementalStream for Projects {
    fn cursor_field(&self) -> &str {
        Self::CURSOR_FIELD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StreamState;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn projects(account_id: &str) -> Projects {
        let config = Arc::new(SourceConfig::new("tok", account_id));
        let auth = Arc::new(TokenAuthenticator::from_config(&config));
        Projects::new(config, auth)
    }

    #[test]
    fn test_path() {
        let stream = projects("12345");
        assert_eq!(stream.path(None), "v2/accounts/12345/projects");
        assert!(!stream.path(None).contains(stream.url_base()));
    }

    #[test]
    fn test_path_idempotent() {
        let stream = projects("7");
        let first = stream.path(None);
        assert_eq!(stream.path(None), first);
        assert_eq!(stream.path(None), first);
    }

    #[test]
    fn test_identity() {
        let stream = projects("7");
        assert_eq!(stream.name(), "projects");
        assert_eq!(stream.primary_key(), Some("project_id"));
        assert_eq!(stream.cursor_field(), "updated_at");
        assert!(stream.state_checkpoint_interval().is_none());
        assert_eq!(stream.url_base(), "https://cloud.getdbt.com/api/");
    }

    #[test]
    fn test_parse_response() {
        let stream = projects("7");
        let response = ApiResponse::new(
            200,
            r#"{"data":[{"project_id":1,"updated_at":"2022-01-01"},{"project_id":2,"updated_at":"2022-02-01"}]}"#,
        );

        let records = stream.parse_response(&response).unwrap();

        assert_eq!(
            records,
            vec![
                json!({"project_id": 1, "updated_at": "2022-01-01"}),
                json!({"project_id": 2, "updated_at": "2022-02-01"}),
            ]
        );
    }

    #[test]
    fn test_single_page_only() {
        let stream = projects("7");
        let response = ApiResponse::new(
            200,
            r#"{"data":[{"project_id":1}],"extra":{"pagination":{"count":1,"total_count":250}}}"#,
        );
        assert!(stream.next_page_token(&response).is_none());
    }

    #[test]
    fn test_request_params_empty() {
        let stream = projects("7");
        let state = json!({"updated_at": "2022-01-01"})
            .as_object()
            .cloned()
            .unwrap();

        assert!(stream.request_params(&StreamState::new(), None, None).is_empty());
        assert!(stream.request_params(&state, None, None).is_empty());
    }

    #[test]
    fn test_incremental_state() {
        let stream = projects("7");
        let current = json!({"updated_at": "2022-01-01"}).as_object().cloned().unwrap();
        let latest = json!({"updated_at": "2022-03-01", "project_id": 1});

        let updated = stream
            .as_incremental()
            .unwrap()
            .get_updated_state(&current, &latest);

        assert_eq!(
            updated,
            json!({"updated_at": "2022-03-01"}).as_object().cloned().unwrap()
        );
    }
}
