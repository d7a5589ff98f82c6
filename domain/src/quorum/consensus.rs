//! Vote tally and voting rounds

use super::rule::QuorumRule;
use super::vote::{Vote, VoteChoice};
use serde::{Deserialize, Serialize};

/// Counts of each vote choice over one round
///
/// `total` is always the number of votes collected, so the three counts
/// share one denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub approve: usize,
    pub reject: usize,
    pub needs_revision: usize,
    pub total: usize,
}

impl VoteTally {
    pub fn from_votes(votes: &[Vote]) -> Self {
        let mut tally = Self {
            total: votes.len(),
            ..Self::default()
        };
        for vote in votes {
            match vote.choice {
                VoteChoice::Approve => tally.approve += 1,
                VoteChoice::Reject => tally.reject += 1,
                VoteChoice::NeedsRevision => tally.needs_revision += 1,
            }
        }
        tally
    }

    pub fn count(&self, choice: VoteChoice) -> usize {
        match choice {
            VoteChoice::Approve => self.approve,
            VoteChoice::Reject => self.reject,
            VoteChoice::NeedsRevision => self.needs_revision,
        }
    }

    /// Whether the approvals satisfy `rule`
    pub fn is_approved(&self, rule: &QuorumRule) -> bool {
        rule.is_satisfied(self.approve, self.total)
    }

    /// Human-readable tally, always in APPROVE / REJECT / NEEDS REVISION order
    ///
    /// ```
    /// use council_domain::VoteTally;
    ///
    /// let tally = VoteTally { approve: 2, reject: 1, needs_revision: 0, total: 3 };
    /// assert_eq!(tally.summary(), "APPROVE: 2/3 | REJECT: 1/3 | NEEDS REVISION: 0/3");
    /// ```
    pub fn summary(&self) -> String {
        VoteChoice::ALL
            .iter()
            .map(|c| format!("{}: {}/{}", c.keyword(), self.count(*c), self.total))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// One completed voting round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRound {
    /// 0 for the first vote, n for the vote after the n-th revision round
    pub round: usize,
    pub votes: Vec<Vote>,
    pub tally: VoteTally,
    pub approved: bool,
    pub summary: String,
}

impl VoteRound {
    pub fn new(round: usize, votes: Vec<Vote>, rule: &QuorumRule) -> Self {
        let tally = VoteTally::from_votes(&votes);
        Self {
            round,
            approved: tally.is_approved(rule),
            summary: tally.summary(),
            tally,
            votes,
        }
    }
}
