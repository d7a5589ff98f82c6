//! Cohere `/v1/chat` client

use super::{BackendClient, GenerationSettings, excerpt, send_json};
use async_trait::async_trait;
use council_application::GatewayError;
use council_domain::{BackendType, ConversationTurn, ProviderSpec, TurnKind};
use serde_json::{Map, Value, json};
use tracing::debug;

pub struct CohereClient {
    http: reqwest::Client,
    settings: GenerationSettings,
}

impl CohereClient {
    pub fn new(http: reqwest::Client, settings: GenerationSettings) -> Self {
        Self { http, settings }
    }

    pub fn endpoint(base_url: &str) -> String {
        format!("{}/v1/chat", base_url.trim_end_matches('/'))
    }

    /// A trailing user turn becomes `message`; everything before it is
    /// `chat_history`.
    pub fn request_body(
        model: &str,
        turns: &[ConversationTurn],
        settings: &GenerationSettings,
    ) -> Value {
        let mut preamble = None;
        let mut history: Vec<(&str, &str)> = Vec::new();

        for turn in turns {
            match turn.kind {
                TurnKind::System => preamble = Some(turn.content.as_str()),
                TurnKind::User => history.push(("USER", turn.content.as_str())),
                TurnKind::AgentReply => history.push(("CHATBOT", turn.content.as_str())),
            }
        }

        let message = match history.last() {
            Some((role, _)) if *role == "USER" => history
                .pop()
                .map(|(_, text)| text.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };

        let mut body = Map::new();
        body.insert("model".to_string(), json!(model));
        body.insert("message".to_string(), json!(message));
        if !history.is_empty() {
            let entries: Vec<Value> = history
                .iter()
                .map(|(role, text)| json!({ "role": role, "message": text }))
                .collect();
            body.insert("chat_history".to_string(), Value::Array(entries));
        }
        if let Some(text) = preamble.filter(|t| !t.is_empty()) {
            body.insert("preamble".to_string(), json!(text));
        }
        body.insert("max_tokens".to_string(), json!(settings.max_tokens));
        body.insert("temperature".to_string(), json!(settings.temperature));
        Value::Object(body)
    }

    pub fn parse_reply(body: &Value) -> Result<String, GatewayError> {
        match body.get("text") {
            Some(Value::String(text)) => Ok(text.clone()),
            Some(Value::Null) => Ok(String::new()),
            _ => Err(GatewayError::MalformedResponse(excerpt(body))),
        }
    }
}

#[async_trait]
impl BackendClient for CohereClient {
    fn backend(&self) -> BackendType {
        BackendType::Cohere
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
