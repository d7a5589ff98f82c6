//! Council vote and consensus domain
//!
//! After the verdict, every agent in the roster votes on the candidate
//! answer. Votes are parsed from free text, tallied, and judged against a
//! [`QuorumRule`].
//!
//! ```text
//! reply text ──parse_vote──→ Vote ──VoteTally::from_votes──→ (approved, summary)
//! ```

pub mod consensus;
pub mod parsing;
pub mod rule;
pub mod vote;

// Re-export main types
pub use consensus::{VoteRound, VoteTally};
pub use parsing::parse_vote;
pub use rule::QuorumRule;
pub use vote::{Vote, VoteChoice};
