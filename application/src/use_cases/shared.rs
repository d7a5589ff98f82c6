//! Shared utilities for use cases.
//!
//! Cancellation checking and the bounded, cancellable gateway call.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use council_domain::ConversationTurn;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Whether cancellation has been requested.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(|t| t.is_cancelled())
}

/// Send `turns` through the gateway, bounded by `timeout` and raced
/// against `cancellation_token`.
///
/// Returns `GatewayError::Timeout` or `GatewayError::Cancelled` when the
/// call did not finish; the in-flight future is dropped in both cases.
pub(crate) async fn send_cancellable<G: LlmGateway + ?Sized>(
    gateway: &G,
    provider: &str,
    model: &str,
    turns: &[ConversationTurn],
    timeout: Duration,
    cancellation_token: &Option<CancellationToken>,
) -> Result<String, GatewayError> {
    let call = tokio::time::timeout(timeout, gateway.send(provider, model, turns));

    let outcome = if let Some(token) = cancellation_token {
        tokio::select! {
            biased;
            _ = token.cancelled() => return Err(GatewayError::Cancelled),
            outcome = call => outcome,
        }
    } else {
        call.await
    };

    outcome.map_err(|_| GatewayError::Timeout)?
}
