//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily-rolling diagnostic logs
    pub dir: Option<PathBuf>,
    /// Path of the JSONL debate transcript
    pub transcript: Option<PathBuf>,
}
