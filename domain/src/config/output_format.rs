//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for debate results
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full transcript with every step and vote
    Full,
    /// Only the final answer and the vote summary (default)
    Answer,
    /// JSON output
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Answer
    }
}
