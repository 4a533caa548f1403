//! State management module
//!
//! Persists per-stream cursor state between sync runs so incremental reads
//! can resume.
//!
//! # Overview
//!
//! - `State` - stream name → `{cursor_field: value}` mapping
//! - `StateManager` - in-memory or file-backed persistence with atomic writes

mod manager;
mod types;

pub use manager::StateManager;
pub use types::State;
