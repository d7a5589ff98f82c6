//! Infrastructure layer for ai-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: provider backend clients behind a routing
//! gateway, configuration file loading, attachment ingestion and the JSONL
//! transcript logger.

pub mod attachments;
pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use attachments::{AttachmentError, AttachmentLimits, AttachmentLoader};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileDebateConfig,
    FileOutputConfig, FileProviderConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{BackendClient, GenerationSettings, routing::RoutingGateway};
