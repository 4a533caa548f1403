//! Execution engine module
//!
//! Main read loop for one stream.
//!
//! # Overview
//!
//! - `SyncEngine` - drives pagination and state updates for a stream
//! - `SyncConfig` - configuration for sync operations
//! - Message types for output (Record, State, Log)
//!
//! Requests are issued one after another; a page is parsed before the next
//! request is built.

mod types;

pub use types::{Message, SyncConfig, SyncStats};

use crate::error::Result;
use crate::http::{join_url, HttpClient, RequestConfig};
use crate::state::StateManager;
use crate::stream::HttpStream;
use crate::types::{PageToken, StreamState, SyncMode};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine {
    /// HTTP client
    client: HttpClient,
    /// State manager
    state: StateManager,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(client: HttpClient, state: StateManager) -> Self {
        Self {
            client,
            state,
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Read one stream to completion and collect its messages
    ///
    /// In incremental mode the stream's stored state is passed to
    /// `request_params` and every record is folded into it; the state is
    /// emitted every `state_checkpoint_interval` records and at the end.
    /// Nothing is persisted unless the whole read succeeds.
    pub async fn read_stream(
        &mut self,
        stream: &dyn HttpStream,
        sync_mode: SyncMode,
    ) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        let mut collect = |message: Message| messages.push(message);
        let final_state = self.read(stream, sync_mode, false, &mut collect).await?;

        if let Some(stream_state) = final_state {
            self.state
                .set_stream_state(stream.name(), stream_state)
                .await?;
        }

        Ok(messages)
    }

    /// Read one stream, handing each message to `emit` as it is produced
    ///
    /// A checkpoint is persisted only after its STATE message has been
    /// emitted, so every persisted cursor covers records the caller has
    /// already received.
    pub async fn read_stream_with<F>(
        &mut self,
        stream: &dyn HttpStream,
        sync_mode: SyncMode,
        mut emit: F,
    ) -> Result<()>
    where
        F: FnMut(Message),
    {
        self.read(stream, sync_mode, true, &mut emit).await?;
        Ok(())
    }

    async fn read<F>(
        &mut self,
        stream: &dyn HttpStream,
        sync_mode: SyncMode,
        persist_checkpoints: bool,
        emit: &mut F,
    ) -> Result<Option<StreamState>>
    where
        F: FnMut(Message),
    {
        let start = Instant::now();
        let name = stream.name().to_string();

        info!(stream = %name, ?sync_mode, "Starting read");
        emit(Message::info(format!("Starting sync for stream: {name}")));

        let incremental = match sync_mode {
            SyncMode::Incremental => {
                let incremental = stream.as_incremental();
                if incremental.is_none() {
                    warn!(stream = %name, "Stream does not support incremental sync");
                    emit(Message::warn(format!(
                        "Stream {name} does not support incremental sync, reading full refresh"
                    )));
                }
                incremental
            }
            SyncMode::FullRefresh => None,
        };

        let mut stream_state = match incremental {
            Some(_) => self.state.get_stream_state(&name).await.unwrap_or_default(),
            None => StreamState::new(),
        };
        let checkpoint_interval = incremental
            .and_then(|s| s.state_checkpoint_interval())
            .filter(|n| *n > 0);

        let mut record_count = 0usize;
        let mut page_count = 0usize;

        'slices: for slice in stream.stream_slices(&stream_state) {
            let mut page_token: Option<PageToken> = None;

            loop {
                let params = stream.request_params(&stream_state, slice.as_ref(), page_token.as_ref());
                let url = join_url(stream.url_base(), &stream.path(slice.as_ref()))?;

                let response = self
                    .client
                    .get(
                        &url,
                        RequestConfig::new().queries(params),
                        Some(stream.authenticator()),
                    )
                    .await?;

                page_count += 1;
                self.stats.add_page();

                let records = stream.parse_response(&response)?;
                debug!(stream = %name, page = page_count, records = records.len(), "Fetched page");
                emit(Message::debug(format!(
                    "Page {page_count}: fetched {} records",
                    records.len()
                )));

                for record in records {
                    if let Some(incremental) = incremental {
                        stream_state = incremental.get_updated_state(&stream_state, &record);
                    }
                    emit(Message::record(&name, record));
                    record_count += 1;
                    self.stats.add_records(1);

                    if let Some(interval) = checkpoint_interval {
                        if record_count % interval == 0 {
                            self.checkpoint(&name, &stream_state, persist_checkpoints, emit)
                                .await?;
                        }
                    }

                    if self.config.max_records > 0 && record_count >= self.config.max_records {
                        debug!(stream = %name, "Reached max records ({})", self.config.max_records);
                        break 'slices;
                    }
                }

                match stream.next_page_token(&response) {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
        }

        if incremental.is_some() {
            self.checkpoint(&name, &stream_state, persist_checkpoints, emit)
                .await?;
        }

        self.stats.add_stream();
        self.stats.add_duration(start.elapsed().as_millis() as u64);

        info!(stream = %name, records = record_count, pages = page_count, "Completed read");
        emit(Message::info(format!(
            "Completed sync for {name}: {record_count} records in {page_count} pages"
        )));

        Ok(incremental.map(|_| stream_state))
    }

    /// Emit a STATE message, then persist it when requested
    async fn checkpoint<F>(
        &mut self,
        name: &str,
        stream_state: &StreamState,
        persist: bool,
        emit: &mut F,
    ) -> Result<()>
    where
        F: FnMut(Message),
    {
        self.stats.add_state();
        emit(Message::state(name, stream_state.clone()));
        if persist {
            self.state
                .set_stream_state(name, stream_state.clone())
                .await?;
        }
        Ok(())
    }
}
