//! Domain layer for ai-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council is an ordered roster of [`Agent`]s. Each agent has a [`Role`]
//! (thinker, critic, judge, or a specialist role) and is backed by a
//! provider/model pair from the [`CouncilCatalog`].
//!
//! ## Debate
//!
//! The debate walks a fixed sequence of [`DebatePhase`]s. Every completed
//! agent turn becomes a [`DebateStep`] appended to the append-only
//! [`TurnHistory`], which is the whole memory of the debate.
//!
//! ## Consensus
//!
//! After the verdict every agent casts a [`Vote`]. The [`VoteTally`] decides
//! approval under a [`QuorumRule`] (strict majority by default).

pub mod agent;
pub mod config;
pub mod core;
pub mod debate;
pub mod prompt;
pub mod providers;
pub mod quorum;

// Re-export commonly used types
pub use agent::{
    entities::Agent,
    role::{Role, RoleSpec},
    roster::RoleBuckets,
};
pub use config::{
    CouncilCatalog, OutputFormat,
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use core::{error::DomainError, question::Question};
pub use debate::{
    conversation::{ConversationTurn, TurnKind},
    entities::{DebateStep, StepType},
    history::TurnHistory,
    phase::DebatePhase,
    result::DebateResult,
};
pub use prompt::TurnBuilder;
pub use providers::{BackendType, ProviderSpec};

// Re-export quorum types
pub use quorum::{
    QuorumRule, Vote, VoteChoice, VoteRound, VoteTally, parse_vote,
};
