//! Debate parameters: engine loop control.
//!
//! [`DebateParams`] groups the static parameters that control the
//! [`RunDebateUseCase`](crate::use_cases::run_debate::RunDebateUseCase).

use council_domain::QuorumRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Engine loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateParams {
    /// Extra revise/verdict/vote rounds after a non-approving vote.
    pub max_revision_rounds: usize,
    /// Upper bound for a single gateway call.
    pub call_timeout: Duration,
    /// Consensus rule applied to every voting round.
    pub rule: QuorumRule,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            max_revision_rounds: 2,
            call_timeout: Duration::from_secs(60),
            rule: QuorumRule::Majority,
        }
    }
}

impl DebateParams {
    pub fn with_max_revision_rounds(mut self, rounds: usize) -> Self {
        self.max_revision_rounds = rounds;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_rule(mut self, rule: QuorumRule) -> Self {
        self.rule = rule;
        self
    }
}
