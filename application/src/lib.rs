//! Application layer for ai-council
//!
//! This crate contains the debate engine, provider admission control, and
//! the ports the engine depends on. It depends only on the domain layer.

pub mod admission;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use admission::{
    Admission, AdmissionController, AdmissionError, Clock, ProviderUsage, RateWindow, SystemClock,
};
pub use config::DebateParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{DebateProgressNotifier, NoProgress},
};
pub use use_cases::run_debate::{RunDebateError, RunDebateInput, RunDebateUseCase};
