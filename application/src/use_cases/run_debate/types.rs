//! Input and error types for the debate engine

use crate::admission::AdmissionError;
use crate::ports::llm_gateway::GatewayError;
use council_domain::{Agent, DebatePhase, DomainError, Question};
use thiserror::Error;

/// Errors that end a debate without a result
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] DomainError),

    #[error("{phase}: no provider available for {agent}: {source}")]
    AdmissionExhausted {
        phase: DebatePhase,
        agent: String,
        source: AdmissionError,
    },

    #[error("{phase}: call for {agent} failed: {source}")]
    PhaseFailed {
        phase: DebatePhase,
        agent: String,
        source: GatewayError,
    },

    #[error("Debate cancelled")]
    Cancelled,
}

impl RunDebateError {
    /// Phase in which the debate stopped, when it stopped inside one
    pub fn phase(&self) -> Option<DebatePhase> {
        match self {
            RunDebateError::AdmissionExhausted { phase, .. }
            | RunDebateError::PhaseFailed { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunDebateError::Cancelled)
    }
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    pub question: Question,
    /// Roster in debate order
    pub agents: Vec<Agent>,
    /// Attachment text shown to every debate step
    pub context: Option<String>,
}

impl RunDebateInput {
    pub fn new(question: Question, agents: Vec<Agent>) -> Self {
        Self {
            question,
            agents,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = (!context.trim().is_empty()).then_some(context);
        self
    }
}

/// Why a single dispatch did not produce a reply
#[derive(Debug)]
pub(super) enum CallError {
    Admission(AdmissionError),
    Gateway(GatewayError),
}

impl CallError {
    pub(super) fn into_run_error(self, phase: DebatePhase, agent: &Agent) -> RunDebateError {
        match self {
            CallError::Gateway(GatewayError::Cancelled) => RunDebateError::Cancelled,
            CallError::Gateway(source) => RunDebateError::PhaseFailed {
                phase,
                agent: agent.name.clone(),
                source,
            },
            CallError::Admission(source) => RunDebateError::AdmissionExhausted {
                phase,
                agent: agent.name.clone(),
                source,
            },
        }
    }

    pub(super) fn is_cancelled(&self) -> bool {
        matches!(self, CallError::Gateway(GatewayError::Cancelled))
    }
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallError::Admission(e) => write!(f, "{}", e),
            CallError::Gateway(e) => write!(f, "{}", e),
        }
    }
}
