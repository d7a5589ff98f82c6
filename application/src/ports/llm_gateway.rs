//! LLM Gateway port
//!
//! Defines the single capability the debate engine needs from a
//! text-generation backend.

use async_trait::async_trait;
use council_domain::ConversationTurn;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
///
/// The engine treats every variant as an opaque failure; the distinctions
/// exist for logs and user-facing messages.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Cancelled")]
    Cancelled,

    #[error("Other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `turns` to `model` on `provider` and return the reply text
    async fn send(
        &self,
        provider: &str,
        model: &str,
        turns: &[ConversationTurn],
    ) -> Result<String, GatewayError>;
}
