//! dbt Cloud streams
//!
//! `DbtCloudStream` holds what every dbt Cloud resource shares (config,
//! authenticator, record envelope). Concrete resources wrap it and are
//! exposed through the [`SourceStream`] enum.

mod projects;

pub use projects::Projects;

use crate::auth::TokenAuthenticator;
use crate::config::SourceConfig;
use crate::error::Result;
use crate::http::ApiResponse;
use crate::stream::{extract_records, HttpStream, IncrementalStream};
use crate::types::{PageToken, Record, StreamSlice, StreamState, StringMap};
use std::sync::Arc;

/// Key holding the record array in every dbt Cloud response
pub const RECORDS_KEY: &str = "data";

/// Shared parts of every dbt Cloud stream
#[derive(Debug, Clone)]
pub struct DbtCloudStream {
    config: Arc<SourceConfig>,
    authenticator: Arc<TokenAuthenticator>,
}

impl DbtCloudStream {
    /// Create the shared stream base
    pub fn new(config: Arc<SourceConfig>, authenticator: Arc<TokenAuthenticator>) -> Self {
        Self {
            config,
            authenticator,
        }
    }

    /// Account every request is scoped to
    pub fn account_id(&self) -> &str {
        self.config.account_id()
    }

    /// API root
    pub fn url_base(&self) -> &str {
        self.config.base_url()
    }

    /// Shared authenticator
    pub fn authenticator(&self) -> &TokenAuthenticator {
        &self.authenticator
    }

    /// Records under the `data` key, verbatim
    pub fn parse_response(&self, response: &ApiResponse) -> Result<Vec<Record>> {
        extract_records(response, RECORDS_KEY)
    }
}

/// Every stream this source exposes
#[derive(Debug, Clone)]
pub enum SourceStream {
    /// Account projects
    Projects(Projects),
}

impl SourceStream {
    fn inner(&self) -> &dyn HttpStream {
        match self {
            SourceStream::Projects(s) => s,
        }
    }

    /// Account the stream reads from
    pub fn account_id(&self) -> &str {
        match self {
            SourceStream::Projects(s) => s.account_id(),
        }
    }
}

impl HttpStream for SourceStream {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn url_base(&self) -> &str {
        self.inner().url_base()
    }

    fn path(&self, slice: Option<&StreamSlice>) -> String {
        self.inner().path(slice)
    }

    fn primary_key(&self) -> Option<&str> {
        self.inner().primary_key()
    }

    fn authenticator(&self) -> &TokenAuthenticator {
        self.inner().authenticator()
    }

    fn stream_slices(&self, state: &StreamState) -> Vec<Option<StreamSlice>> {
        self.inner().stream_slices(state)
    }

    fn request_params(
        &self,
        state: &StreamState,
        slice: Option<&StreamSlice>,
        page_token: Option<&PageToken>,
    ) -> StringMap {
        self.inner().request_params(state, slice, page_token)
    }

    fn next_page_token(&self, response: &ApiResponse) -> Option<PageToken> {
        self.inner().next_page_token(response)
    }

    fn parse_response(&self, response: &ApiResponse) -> Result<Vec<Record>> {
        self.inner().parse_response(response)
    }

    fn as_incremental(&self) -> Option<&dyn IncrementalStream> {
        self.inner().as_incremental()
    }
}

impl From<Projects> for SourceStream {
    fn from(stream: Projects) -> Self {
        SourceStream::Projects(stream)
    }
}
