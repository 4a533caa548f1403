// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # dbt Cloud source connector
//!
//! Extracts account projects from the dbt Cloud administrative API.
//!
//! ## Features
//!
//! - **Token auth**: `Authorization: Bearer <token>` on every request
//! - **Connection check**: one call to the account-info endpoint
//! - **Incremental sync**: the `updated_at` cursor only moves forward
//! - **Protocol output**: RECORD, STATE and LOG messages as JSON lines
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use source_dbt_cloud::{HttpClient, Source, SourceConfig, SourceDbtCloud, StateManager, SyncEngine, SyncMode};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> source_dbt_cloud::Result<()> {
//!     let config = Arc::new(SourceConfig::new("dbtc_token", "12345"));
//!     let source = SourceDbtCloud::new()?;
//!
//!     let status = source.check_connection(&config).await;
//!     assert!(status.success);
//!
//!     let mut engine = SyncEngine::new(HttpClient::new()?, StateManager::in_memory());
//!     for stream in source.streams(&config) {
//!         for message in engine.read_stream(&stream, SyncMode::Incremental).await? {
//!             println!("{message:?}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       SourceDbtCloud                         │
//! │  spec() → ConnectorSpec  check_connection() → CheckResult    │
//! │  streams(config) → [SourceStream::Projects]                  │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────┬────────────┬────┴─────────┬────────────┬─────────┐
//! │   Auth    │    HTTP    │    Stream    │   Engine   │  State  │
//! ├───────────┼────────────┼──────────────┼────────────┼─────────┤
//! │ Bearer    │ GET        │ HttpStream   │ Pages      │ JSON    │
//! │ token     │ Timeout    │ Incremental  │ Checkpoint │ Atomic  │
//! └───────────┴────────────┴──────────────┴────────────┴─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Source configuration
pub mod config;

/// Token authentication
pub mod auth;

/// HTTP client
pub mod http;

/// Stream traits and cursor handling
pub mod stream;

/// dbt Cloud streams
pub mod streams;

/// State management and checkpointing
pub mod state;

/// Read driver
pub mod engine;

/// Source trait and connector specification
pub mod connector;

/// dbt Cloud source
pub mod source;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::TokenAuthenticator;
pub use config::SourceConfig;
pub use connector::{CheckResult, ConnectorSpec, Source};
pub use engine::{Message, SyncConfig, SyncEngine, SyncStats};
pub use http::HttpClient;
pub use source::SourceDbtCloud;
pub use state::StateManager;
pub use stream::{HttpStream, IncrementalStream};
pub use streams::{Projects, SourceStream};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
