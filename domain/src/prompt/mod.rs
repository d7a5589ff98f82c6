//! Prompt domain
//!
//! Builds the conversation sent to a provider at each stage of the debate.

mod turns;

pub use turns::TurnBuilder;
