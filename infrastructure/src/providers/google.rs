//! Google AI Studio `generateContent` client

use super::{BackendClient, GenerationSettings, excerpt, send_json};
use async_trait::async_trait;
use council_application::GatewayError;
use council_domain::{BackendType, ConversationTurn, ProviderSpec, TurnKind};
use serde_json::{Map, Value, json};
use tracing::debug;

pub struct GoogleClient {
    http: reqwest::Client,
    settings: GenerationSettings,
}

impl GoogleClient {
    pub fn new(http: reqwest::Client, settings: GenerationSettings) -> Self {
        Self { http, settings }
    }

    pub fn endpoint(base_url: &str, model: &str) -> String {
        format!("{}/{}:generateContent", base_url.trim_end_matches('/'), model)
    }

    /// The last system turn becomes `system_instruction`; agent replies are
    /// sent with the `model` role.
    pub fn request_body(turns: &[ConversationTurn], settings: &GenerationSettings) -> Value {
        let mut system_text = None;
        let mut contents = Vec::new();

        for turn in turns {
            let role = match turn.kind {
                TurnKind::System => {
                    system_text = Some(turn.content.as_str());
                    continue;
                }
                TurnKind::User => "user",
                TurnKind::AgentReply => "model",
            };
            contents.push(json!({ "role": role, "parts": [{ "text": turn.content }] }));
        }

        let mut body = Map::new();
        body.insert("contents".to_string(), Value::Array(contents));
        if let Some(text) = system_text.filter(|t| !t.is_empty()) {
            body.insert(
                "system_instruction".to_string(),
                json!({ "parts": [{ "text": text }] }),
            );
        }
        body.insert(
            "generationConfig".to_string(),
            json!({
                "maxOutputTokens": settings.max_tokens,
                "temperature": settings.temperature,
            }),
        );
        Value::Object(body)
    }

    pub fn parse_reply(body: &Value) -> Result<String, GatewayError> {
        body.pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                GatewayError::MalformedResponse(format!(
                    "Unexpected Google API response: {}",
                    excerpt(body)
                ))
            })
    }
}

#[async_trait]
impl BackendClient for GoogleClient {
    fn backend(&self) -> BackendType {
        BackendType::Google
    }

    async fn chat(
        &self,
        spec: &ProviderSpec,
        api_key: &str,
        model: &str,
        turns: &[ConversationTurn],
    ) -> Result<String, GatewayError> {
        let url = Self::endpoint(&spec.base_url, model);
        debug!("POST {}", url);

        let request = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(&Self::request_body(turns, &self.settings));

        Self::parse_reply(&send_json(request).await?)
    }
}
