//! Configuration file loading for ai-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed `COUNCIL_` (nested keys split on `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. Global: `$XDG_CONFIG_HOME/ai-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentConfig, FileAttachmentsConfig, FileConfig, FileCouncilConfig,
    FileDebateConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig, FileRoleConfig,
};
pub use loader::ConfigLoader;
