//! Debate domain
//!
//! Entities produced while a debate runs:
//!
//! - [`conversation::ConversationTurn`]: one turn sent to a provider
//! - [`entities::DebateStep`]: one completed agent turn
//! - [`history::TurnHistory`]: append-only record of every step
//! - [`phase::DebatePhase`]: the state machine's states
//! - [`result::DebateResult`]: terminal aggregate

pub mod conversation;
pub mod entities;
pub mod history;
pub mod phase;
pub mod result;
