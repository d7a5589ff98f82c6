//! Provider backend clients
//!
//! One [`BackendClient`] per [`BackendType`] wire family. The
//! [`RoutingGateway`](routing::RoutingGateway) picks the client for a
//! provider from the catalog and hands it the resolved API key.

pub mod cohere;
pub mod google;
pub mod openai;
pub mod routing;

use async_trait::async_trait;
use council_application::GatewayError;
use council_domain::{BackendType, ConversationTurn, ProviderSpec};
use serde_json::Value;

/// Sampling settings shared by every backend request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

/// A client for one backend wire family
#[async_trait]
pub trait BackendClient: Send + Sync {
    fn backend(&self) -> BackendType;

    /// Send `turns` to `model` on the provider described by `spec`
    async fn chat(
        &self,
        spec: &ProviderSpec,
        api_key: &str,
        model: &str,
        turns: &[ConversationTurn],
    ) -> Result<String, GatewayError>;
}

/// Send a prepared request and decode the JSON body.
///
/// Non-success statuses become [`GatewayError::RequestFailed`] carrying the
/// status and the response body.
pub(crate) async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, GatewayError> {
    let response = request.send().await.map_err(map_reqwest_error)?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::RequestFailed(format!(
            "HTTP {}: {}",
            status.as_u16(),
            body.trim()
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| GatewayError::MalformedResponse(e.to_string()))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else {
        GatewayError::RequestFailed(err.to_string())
    }
}

/// Truncated rendering of a response for error messages
pub(crate) fn excerpt(value: &Value) -> String {
    const MAX: usize = 200;
    let text = value.to_string();
    if text.chars().count() > MAX {
        format!("{}...", text.chars().take(MAX).collect::<String>())
    } else {
        text
    }
}
