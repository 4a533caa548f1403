//! CLI commands and argument parsing

use crate::types::SyncMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dbt Cloud source connector
#[derive(Parser, Debug)]
#[command(name = "source-dbt-cloud")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short = 'C', long, global = true, conflicts_with = "config_json")]
    pub config: Option<PathBuf>,

    /// Inline config JSON
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// State file (JSON)
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Inline state JSON
    #[arg(long, global = true)]
    pub state_json: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show connector specification
    Spec,

    /// Test connection to the API
    Check,

    /// List available streams
    Streams,

    /// Read data from streams
    Read {
        /// Streams to sync (comma-separated, empty = all)
        #[arg(long)]
        streams: Option<String>,

        /// Sync mode
        #[arg(long, default_value = "full_refresh", value_parser = parse_sync_mode)]
        sync_mode: SyncMode,

        /// Maximum records per stream
        #[arg(long)]
        max_records: Option<usize>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_sync_mode(value: &str) -> Result<SyncMode, String> {
    value.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_read() {
        let cli = Cli::try_parse_from([
            "source-dbt-cloud",
            "--config-json",
            r#"{"api_token": "t", "account_id": 1}"#,
            "read",
            "--streams",
            "projects",
            "--sync-mode",
            "incremental",
            "--max-records",
            "5",
        ])
        .unwrap();

        assert!(cli.config_json.is_some());
        match cli.command {
            Commands::Read {
                streams,
                sync_mode,
                max_records,
            } => {
                assert_eq!(streams.as_deref(), Some("projects"));
                assert_eq!(sync_mode, SyncMode::Incremental);
                assert_eq!(max_records, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_read_defaults_to_full_refresh() {
        let cli = Cli::try_parse_from(["source-dbt-cloud", "read"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Read {
                sync_mode: SyncMode::FullRefresh,
                ..
            }
        ));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_rejects_unknown_sync_mode() {
        assert!(Cli::try_parse_from(["source-dbt-cloud", "read", "--sync-mode", "append"]).is_err());
    }

    #[test]
    fn test_config_sources_conflict() {
        let result = Cli::try_parse_from([
            "source-dbt-cloud",
            "--config",
            "config.json",
            "--config-json",
            "{}",
            "check",
        ]);
        assert!(result.is_err());
    }
}
