//! Presentation layer for ai-council
//!
//! This crate contains the CLI definition, the console/JSON result
//! formatter and the progress reporters that observe a running debate.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressMode, ProgressReporter, SimpleProgress};
