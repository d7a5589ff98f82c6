use super::cohere::CohereClient;
use super::google::GoogleClient;
use super::openai::OpenAiCompatibleClient;
use super::{BackendClient, GenerationSettings};
use async_trait::async_trait;
use council_application::{GatewayError, LlmGateway};
use council_domain::{BackendType, ConversationTurn, CouncilCatalog, ProviderSpec};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type KeyLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// [`LlmGateway`] that routes each call to the client for the provider's
/// backend type.
///
/// API keys are resolved per call from the environment variable named by
/// the provider's `api_key_env`.
pub struct RoutingGateway {
    catalog: Arc<CouncilCatalog>,
    clients: Vec<Arc<dyn BackendClient>>,
    key_lookup: Box<KeyLookup>,
}

impl RoutingGateway {
    /// Build a gateway with one client per backend sharing a single HTTP client
    pub fn new(
        catalog: Arc<CouncilCatalog>,
        timeout: Duration,
        settings: GenerationSettings,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let clients: Vec<Arc<dyn BackendClient>> = vec![
            Arc::new(OpenAiCompatibleClient::new(http.clone(), settings)),
            Arc::new(GoogleClient::new(http.clone(), settings)),
            Arc::new(CohereClient::new(http, settings)),
        ];

        Ok(Self::with_clients(catalog, clients))
    }

    pub fn with_clients(catalog: Arc<CouncilCatalog>, clients: Vec<Arc<dyn BackendClient>>) -> Self {
        Self {
            catalog,
            clients,
            key_lookup: Box::new(|name| std::env::var(name).ok()),
        }
    }

    /// Replace environment lookup of API keys
    pub fn with_key_lookup(
        mut self,
        lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.key_lookup = Box::new(lookup);
        self
    }

    /// Whether the provider is known and its API key variable is set
    pub fn is_provider_configured(&self, provider: &str) -> bool {
        self.catalog
            .provider(provider)
            .is_some_and(|spec| self.api_key(spec).is_ok())
    }

    fn api_key(&self, spec: &ProviderSpec) -> Result<String, GatewayError> {
        if spec.api_key_env.is_empty() {
            return Err(GatewayError::Other(format!(
                "Provider '{}' has no api_key_env configured",
                spec.id
            )));
        }

        (self.key_lookup)(&spec.api_key_env)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::MissingApiKey(spec.api_key_env.clone()))
    }

    fn client_for(&self, backend: &BackendType) -> Option<&dyn BackendClient> {
        self.clients
            .iter()
            .find(|c| &c.backend() == backend)
            .map(|c| c.as_ref())
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn send(
        &self,
        provider: &str,
        model: &str,
        turns: &[ConversationTurn],
    ) -> Result<String, GatewayError> {
        let spec = self
            .catalog
            .provider(provider)
            .ok_or_else(|| GatewayError::UnknownProvider(provider.to_string()))?;
        let api_key = self.api_key(spec)?;
        let client = self.client_for(&spec.backend).ok_or_else(|| {
            GatewayError::Other(format!("No client registered for backend {}", spec.backend))
        })?;

        debug!("Routing {} / {} via {} backend", provider, model, spec.backend);
        client.chat(spec, &api_key, model, turns).await
    }
}
