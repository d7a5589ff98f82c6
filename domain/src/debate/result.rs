//! Terminal debate aggregate

use super::entities::DebateStep;
use super::history::TurnHistory;
use super::phase::DebatePhase;
use crate::quorum::{Vote, VoteRound};
use serde::{Deserialize, Serialize};

/// Outcome of a completed debate
///
/// Produced once, when the state machine reaches `Approved` or `Rejected`.
/// A rejected debate still carries the last candidate answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateResult {
    pub question: String,
    /// Every emitted step in completion order
    pub steps: Vec<DebateStep>,
    pub history: TurnHistory,
    /// The last judge's most recent verdict
    pub final_answer: String,
    /// Votes from the final round
    pub votes: Vec<Vote>,
    pub approved: bool,
    pub vote_summary: String,
    /// Every voting round, oldest first
    pub rounds: Vec<VoteRound>,
    pub revision_rounds: usize,
    pub outcome: DebatePhase,
}

impl DebateResult {
    /// Build the result from the final voting round
    pub fn conclude(
        question: impl Into<String>,
        history: TurnHistory,
        final_answer: String,
        rounds: Vec<VoteRound>,
        revision_rounds: usize,
    ) -> Self {
        let (votes, approved, vote_summary) = match rounds.last() {
            Some(round) => (round.votes.clone(), round.approved, round.summary.clone()),
            None => (Vec::new(), false, String::new()),
        };
        let outcome = if approved {
            DebatePhase::Approved
        } else {
            DebatePhase::Rejected
        };

        Self {
            question: question.into(),
            steps: history.entries().to_vec(),
            history,
            final_answer,
            votes,
            approved,
            vote_summary,
            rounds,
            revision_rounds,
            outcome,
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}
