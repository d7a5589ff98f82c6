//! Debate step entity

use crate::agent::entities::Agent;
use crate::agent::role::Role;
use serde::{Deserialize, Serialize};

/// Kind of work a debate step represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepType {
    Proposal,
    Critique,
    Revision,
    ReEvaluation,
    Specialist,
    Verdict,
    Vote,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Proposal => "proposal",
            StepType::Critique => "critique",
            StepType::Revision => "revision",
            StepType::ReEvaluation => "re-evaluation",
            StepType::Specialist => "specialist",
            StepType::Verdict => "verdict",
            StepType::Vote => "vote",
        }
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One completed agent turn (Entity)
///
/// Created right after a successful call and never modified afterwards.
/// `provider`/`model` record what was actually used, which differs from the
/// agent's configuration when admission control substituted a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateStep {
    pub agent_id: String,
    pub agent_name: String,
    pub role: Role,
    pub step_type: StepType,
    pub content: String,
    pub provider: String,
    pub model: String,
}

impl DebateStep {
    pub fn new(
        agent: &Agent,
        step_type: StepType,
        content: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            role: agent.role.clone(),
            step_type,
            content: content.into(),
            provider: provider.into(),
            model: model.into(),
        }
    }

    /// Whether the step was served by a provider other than the agent's own
    pub fn used_fallback(&self, agent: &Agent) -> bool {
        self.provider != agent.provider
    }
}
