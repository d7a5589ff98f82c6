//! OpenAI-compatible `/chat/completions` client (Groq, OpenRouter, Cerebras, ...)

use super::{BackendClient, GenerationSettings, excerpt, send_json};
use async_trait::async_trait;
use council_application::GatewayError;
use council_domain::{BackendType, ConversationTurn, ProviderSpec, TurnKind};
use serde_json::{Value, json};
use tracing::debug;

pub struct OpenAiCompatibleClient {
    http: reqwest::Client,
    settings: GenerationSettings,
}

impl OpenAiCompatibleClient {
    pub fn new(http: reqwest::Client, settings: GenerationSettings) -> Self {
        Self { http, settings }
    }

    pub fn endpoint(base_url: &str) -> String {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }

    pub fn request_body(
        model: &str,
        turns: &[ConversationTurn],
        settings: &GenerationSettings,
    ) -> Value {
        let messages: Vec<Value> = turns
            .iter()
            .map(|turn| {
                let role = match turn.kind {
                    TurnKind::System => "system",
                    TurnKind::User => "user",
                    TurnKind::AgentReply => "assistant",
                };
                json!({ "role": role, "content": turn.content })
            })
            .collect();

        json!({
            "model": model,
            "messages": messages,
            "max_tokens": settings.max_tokens,
            "temperature": settings.temperature,
        })
    }

    /// `choices[0].message.content`; a null content is an empty reply
    pub fn parse_reply(body: &Value) -> Result<String, GatewayError> {
        let message = body
            .pointer("/choices/0/message")
            .ok_or_else(|| GatewayError::MalformedResponse(excerpt(body)))?;

        match message.get("content") {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(Value::Null) | None => Ok(String::new()),
            Some(_) => Err(GatewayError::MalformedResponse(excerpt(body))),
        }
    }
}

#[async_trait]
impl BackendClient for OpenAiCompatibleClient {
    fn backend(&self) -> BackendType {
        BackendType::OpenAiCompatible
    }

    async fn chat(
        &self,
        spec: &ProviderSpec,
        api_key: &str,
        model: &str,
        turns: &[ConversationTurn],
    ) -> Result<String, GatewayError> {
        let url = Self::endpoint(&spec.base_url);
        debug!("POST {} (model: {})", url, model);

        let request = self
            .http
            .post(url)
            .bearer_auth(api_key)
            .json(&Self::request_body(model, turns, &self.settings));

        Self::parse_reply(&send_json(request).await?)
    }
}
