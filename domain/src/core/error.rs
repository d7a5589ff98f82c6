//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are configuration problems detected before any provider call is
/// made, plus cancellation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No agents configured for the council")]
    EmptyRoster,

    #[error("Agent '{agent}' references unknown provider '{provider}'")]
    UnknownProvider { agent: String, provider: String },

    #[error("Agent '{agent}' references unknown role '{role}'")]
    UnknownRole { agent: String, role: String },

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
