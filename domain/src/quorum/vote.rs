//! Vote types for council consensus
//!
//! This module defines the core voting primitives used in council decisions.

use crate::agent::entities::Agent;
use crate::agent::role::Role;
use serde::{Deserialize, Serialize};

/// Classification of a single vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteChoice {
    Approve,
    Reject,
    NeedsRevision,
}

impl VoteChoice {
    /// All choices in keyword recognition order
    pub const ALL: [VoteChoice; 3] = [
        VoteChoice::Approve,
        VoteChoice::Reject,
        VoteChoice::NeedsRevision,
    ];

    /// Keyword agents are asked to reply with
    pub fn keyword(&self) -> &'static str {
        match self {
            VoteChoice::Approve => "APPROVE",
            VoteChoice::Reject => "REJECT",
            VoteChoice::NeedsRevision => "NEEDS REVISION",
        }
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A single agent's vote in one voting round
///
/// # Example
///
/// ```
/// use council_domain::{Agent, Role, Vote, VoteChoice};
///
/// let judge = Agent::new("judge", "Judge", Role::Judge, "openrouter", "mistral");
/// let vote = Vote::new(&judge, VoteChoice::Approve, "Well argued.", "APPROVE\nWell argued.");
/// assert_eq!(vote.choice, VoteChoice::Approve);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub agent_id: String,
    pub agent_name: String,
    pub role: Role,
    pub choice: VoteChoice,
    /// Justification extracted from the reply
    pub reason: String,
    /// Unmodified reply text
    pub raw: String,
}

impl Vote {
    pub fn new(
        agent: &Agent,
        choice: VoteChoice,
        reason: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent.id.clone(),
            agent_name: agent.name.clone(),
            role: agent.role.clone(),
            choice,
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Neutral vote substituted for an agent that could not be reached.
    ///
    /// Counts as NEEDS REVISION so an outage never reads as consent.
    pub fn unavailable(agent: &Agent, failure: impl std::fmt::Display) -> Self {
        let reason = format!("(Agent unavailable: {})", failure);
        let raw = format!("{}\n{}", VoteChoice::NeedsRevision.keyword(), reason);
        Self::new(agent, VoteChoice::NeedsRevision, reason, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judge() -> Agent {
        Agent::new("judge", "Judge", Role::Judge, "openrouter", "mistral")
    }

    #[test]
    fn test_keywords() {
        assert_eq!(VoteChoice::NeedsRevision.keyword(), "NEEDS REVISION");
        assert_eq!(VoteChoice::Approve.to_string(), "APPROVE");
    }

    #[test]
    fn test_unavailable_vote_is_needs_revision() {
        let vote = Vote::unavailable(&judge(), "connection refused");
        assert_eq!(vote.choice, VoteChoice::NeedsRevision);
        assert!(vote.reason.contains("connection refused"));
        assert!(vote.raw.starts_with("NEEDS REVISION"));
    }

    #[test]
    fn test_vote_records_agent_identity() {
        let vote = Vote::new(&judge(), VoteChoice::Reject, "weak", "REJECT\nweak");
        assert_eq!(vote.agent_id, "judge");
        assert_eq!(vote.role, Role::Judge);
    }

    #[test]
    fn test_choice_serializes_screaming_case() {
        let json = serde_json::to_string(&VoteChoice::NeedsRevision).unwrap();
        assert_eq!(json, "\"NEEDS_REVISION\"");
    }
}
