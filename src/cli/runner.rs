//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::SourceConfig;
use crate::connector::{CheckResult, Source};
use crate::engine::{Message, SyncConfig, SyncEngine};
use crate::error::{Error, Result};
use crate::source::SourceDbtCloud;
use crate::state::StateManager;
use crate::stream::HttpStream;
use crate::streams::SourceStream;
use crate::types::{JsonValue, SyncMode};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => self.spec(),
            Commands::Check => self.check().await,
            Commands::Streams => self.streams(),
            Commands::Read {
                streams,
                sync_mode,
                max_records,
            } => self.read(streams.as_deref(), *sync_mode, *max_records).await,
        }
    }

    /// Load configuration
    fn load_config(&self) -> Result<SourceConfig> {
        // Inline config takes precedence
        if let Some(json_str) = &self.cli.config_json {
            return SourceConfig::from_json_str(json_str);
        }

        if let Some(path) = &self.cli.config {
            return SourceConfig::from_file(path);
        }

        Err(Error::config(
            "No configuration given (use --config or --config-json)",
        ))
    }

    /// Load state
    fn load_state(&self) -> Result<StateManager> {
        // Inline state takes precedence
        if let Some(state_json) = &self.cli.state_json {
            StateManager::from_json(state_json)
        } else if let Some(path) = &self.cli.state {
            StateManager::from_file(path)
        } else {
            Ok(StateManager::in_memory())
        }
    }

    /// Show spec
    fn spec(&self) -> Result<()> {
        let spec = SourceDbtCloud::new()?.spec()?;

        self.output_message(&json!({
            "type": "SPEC",
            "spec": spec
        }));

        Ok(())
    }

    /// Check connection
    async fn check(&self) -> Result<()> {
        let result = match self.load_config() {
            Ok(config) => {
                self.output_message(&json!({
                    "type": "LOG",
                    "log": {
                        "level": "INFO",
                        "message": format!("Checking connection to account {}", config.account_id())
                    }
                }));
                SourceDbtCloud::new()?.check_connection(&config).await
            }
            Err(e) => CheckResult::failure(e.to_string()),
        };

        let status = if result.success { "SUCCEEDED" } else { "FAILED" };
        self.output_message(&json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {
                "status": status,
                "message": result.message
            }
        }));

        Ok(())
    }

    /// List streams
    fn streams(&self) -> Result<()> {
        let config = Arc::new(self.load_config()?);
        let streams = SourceDbtCloud::new()?.streams(&config);

        let described: Vec<JsonValue> = streams.iter().map(describe_stream).collect();

        self.output_message(&json!({
            "type": "STREAMS",
            "streams": described
        }));

        Ok(())
    }

    /// Read data
    async fn read(
        &self,
        stream_filter: Option<&str>,
        sync_mode: SyncMode,
        max_records: Option<usize>,
    ) -> Result<()> {
        let sync_start = Instant::now();
        let config = Arc::new(self.load_config()?);
        let state = self.load_state()?;

        let source = SourceDbtCloud::new()?;
        let selected = select_streams(source.streams(&config), stream_filter)?;

        let mut sync_config = SyncConfig::new();
        if let Some(max) = max_records {
            sync_config = sync_config.with_max_records(max);
        }

        let mut engine = SyncEngine::new(source.client().clone(), state).with_config(sync_config);

        for stream in &selected {
            engine
                .read_stream_with(stream, sync_mode, |message| {
                    self.output_engine_message(&message);
                })
                .await?;
        }

        if let Some(state_path) = &self.cli.state {
            engine.state().save_to_file(state_path).await?;
        }

        // Always emit final state to stdout so caller can capture it
        let final_state = engine.state().snapshot().await;
        self.output_message(&json!({
            "type": "STATE",
            "state": final_state
        }));

        let stats = engine.stats();
        info!(
            records = stats.records_synced,
            streams = stats.streams_synced,
            "Sync finished"
        );
        self.output_message(&json!({
            "type": "SYNC_SUMMARY",
            "summary": {
                "status": "SUCCEEDED",
                "total_records": stats.records_synced,
                "total_pages": stats.pages_fetched,
                "total_streams": stats.streams_synced,
                "states_emitted": stats.states_emitted,
                "duration_ms": sync_start.elapsed().as_millis() as u64
            }
        }));

        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }

    /// Output an engine message
    fn output_engine_message(&self, msg: &Message) {
        self.output_message(&engine_message_json(msg));
    }
}

/// Protocol representation of an engine message
fn engine_message_json(msg: &Message) -> JsonValue {
    match msg {
        Message::Record {
            stream,
            data,
            emitted_at,
        } => json!({
            "type": "RECORD",
            "record": {
                "stream": stream,
                "data": data,
                "emitted_at": emitted_at.timestamp_millis()
            }
        }),
        Message::State { stream, data } => json!({
            "type": "STATE",
            "state": {
                "type": "STREAM",
                "stream": {
                    "stream_descriptor": {
                        "name": stream
                    },
                    "stream_state": data
                }
            }
        }),
        Message::Log { level, message } => json!({
            "type": "LOG",
            "log": {
                "level": level.as_str(),
                "message": message
            }
        }),
    }
}

fn describe_stream(stream: &SourceStream) -> JsonValue {
    let cursor_field = stream.as_incremental().map(|s| s.cursor_field().to_string());
    let sync_modes = if cursor_field.is_some() {
        vec![SyncMode::FullRefresh, SyncMode::Incremental]
    } else {
        vec![SyncMode::FullRefresh]
    };

    json!({
        "name": stream.name(),
        "primary_key": stream.primary_key(),
        "cursor_field": cursor_field,
        "supported_sync_modes": sync_modes
    })
}

/// Keep the streams named in a comma-separated filter, in filter order
fn select_streams(streams: Vec<SourceStream>, filter: Option<&str>) -> Result<Vec<SourceStream>> {
    let names: Vec<&str> = filter
        .map(|f| f.split(',').map(str::trim).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if names.is_empty() {
        return Ok(streams);
    }

    names
        .into_iter()
        .map(|name| {
            streams
                .iter()
                .find(|s| s.name() == name)
                .cloned()
                .ok_or_else(|| Error::stream_not_found(name))
        })
        .collect()
}
