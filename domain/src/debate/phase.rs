//! Debate phase state machine
//!
//! ```text
//! Propose → Critique → Revise → ReEvaluate → Specialist → Verdict → Vote
//!                                                            ↑        │
//!                                                            │        ├─ approved ───────────→ Approved
//!                                                       ReviseAgain ←─┤ rounds left
//!                                                                     └─ rounds exhausted ───→ Rejected
//! ```

use super::entities::StepType;
use serde::{Deserialize, Serialize};

/// State of a debate run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    /// Thinkers propose initial solutions
    Propose,
    /// Critics critique the proposals
    Critique,
    /// Thinkers revise based on criticism
    Revise,
    /// Critics re-evaluate the revisions
    ReEvaluate,
    /// Specialist roles contribute
    Specialist,
    /// Judges give the verdict; the last judge's verdict is the candidate answer
    Verdict,
    /// Every agent votes on the candidate answer
    Vote,
    /// Thinkers revise again in response to the vote
    ReviseAgain,
    /// Terminal: the council approved
    Approved,
    /// Terminal: revision rounds exhausted without approval
    Rejected,
}

impl DebatePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebatePhase::Propose => "propose",
            DebatePhase::Critique => "critique",
            DebatePhase::Revise => "revise",
            DebatePhase::ReEvaluate => "re_evaluate",
            DebatePhase::Specialist => "specialist",
            DebatePhase::Verdict => "verdict",
            DebatePhase::Vote => "vote",
            DebatePhase::ReviseAgain => "revise_again",
            DebatePhase::Approved => "approved",
            DebatePhase::Rejected => "rejected",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DebatePhase::Propose => "Proposals",
            DebatePhase::Critique => "Critique",
            DebatePhase::Revise => "Revision",
            DebatePhase::ReEvaluate => "Re-evaluation",
            DebatePhase::Specialist => "Specialist Review",
            DebatePhase::Verdict => "Verdict",
            DebatePhase::Vote => "Council Vote",
            DebatePhase::ReviseAgain => "Revision Round",
            DebatePhase::Approved => "Approved",
            DebatePhase::Rejected => "Rejected",
        }
    }

    /// Step type produced by agents acting in this phase
    pub fn step_type(&self) -> Option<StepType> {
        match self {
            DebatePhase::Propose => Some(StepType::Proposal),
            DebatePhase::Critique => Some(StepType::Critique),
            DebatePhase::Revise | DebatePhase::ReviseAgain => Some(StepType::Revision),
            DebatePhase::ReEvaluate => Some(StepType::ReEvaluation),
            DebatePhase::Specialist => Some(StepType::Specialist),
            DebatePhase::Verdict => Some(StepType::Verdict),
            DebatePhase::Vote => Some(StepType::Vote),
            DebatePhase::Approved | DebatePhase::Rejected => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DebatePhase::Approved | DebatePhase::Rejected)
    }

    /// Unconditional successor, or `None` for `Vote` (which depends on the
    /// tally) and terminal states.
    pub fn next(&self) -> Option<DebatePhase> {
        match self {
            DebatePhase::Propose => Some(DebatePhase::Critique),
            DebatePhase::Critique => Some(DebatePhase::Revise),
            DebatePhase::Revise => Some(DebatePhase::ReEvaluate),
            DebatePhase::ReEvaluate => Some(DebatePhase::Specialist),
            DebatePhase::Specialist => Some(DebatePhase::Verdict),
            DebatePhase::Verdict => Some(DebatePhase::Vote),
            DebatePhase::ReviseAgain => Some(DebatePhase::Verdict),
            DebatePhase::Vote | DebatePhase::Approved | DebatePhase::Rejected => None,
        }
    }

    /// Successor of `Vote` given the tally and the revision rounds already run.
    pub fn after_vote(approved: bool, rounds_done: usize, max_rounds: usize) -> DebatePhase {
        if approved {
            DebatePhase::Approved
        } else if rounds_done < max_rounds {
            DebatePhase::ReviseAgain
        } else {
            DebatePhase::Rejected
        }
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
