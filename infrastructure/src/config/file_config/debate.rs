//! Debate configuration from TOML (`[debate]` section)

use council_application::DebateParams;
use council_domain::{ConfigIssue, ConfigIssueCode, QuorumRule};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw debate configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Extra revise/verdict/vote rounds after a non-approving vote
    pub max_revision_rounds: usize,
    /// Per-call timeout in seconds
    pub timeout_seconds: u64,
    /// Reply length cap passed to providers
    pub max_tokens: u32,
    /// Sampling temperature passed to providers
    pub temperature: f32,
    /// Consensus rule: "majority", "unanimous", "at_least:N", "percentage:P"
    pub consensus: String,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            max_revision_rounds: 2,
            timeout_seconds: 60,
            max_tokens: 2048,
            temperature: 0.7,
            consensus: "majority".to_string(),
        }
    }
}

impl FileDebateConfig {
    /// Parse the consensus rule, reporting an invalid value.
    pub fn parse_consensus(&self) -> (QuorumRule, Option<ConfigIssue>) {
        match self.consensus.parse::<QuorumRule>() {
            Ok(rule) => (rule, None),
            Err(e) => (
                QuorumRule::default(),
                Some(ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "debate.consensus".to_string(),
                        value: self.consensus.clone(),
                        valid_values: vec![
                            "majority".to_string(),
                            "unanimous".to_string(),
                            "at_least:N".to_string(),
                            "percentage:P".to_string(),
                        ],
                    },
                    format!("debate.consensus: {}", e),
                )),
            ),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Engine parameters; an invalid consensus rule falls back to majority
    pub fn to_params(&self) -> DebateParams {
        DebateParams::default()
            .with_max_revision_rounds(self.max_revision_rounds)
            .with_call_timeout(self.timeout())
            .with_rule(self.parse_consensus().0)
    }
}
