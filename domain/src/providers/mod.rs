//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.).

/// Wire family of a provider backend.
///
/// Providers sharing a backend type are preferred substitutes for each
/// other when one of them is rate-limited.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendType {
    /// `/chat/completions` compatible REST API (Groq, OpenRouter, Cerebras, ...)
    OpenAiCompatible,
    /// Google AI Studio `generateContent` REST API
    Google,
    /// Cohere chat API
    Cohere,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::OpenAiCompatible => "openai_compatible",
            BackendType::Google => "google",
            BackendType::Cohere => "cohere",
        }
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai_compatible" | "openai-compatible" | "openai" => {
                Ok(BackendType::OpenAiCompatible)
            }
            "google" | "gemini" => Ok(BackendType::Google),
            "cohere" => Ok(BackendType::Cohere),
            other => Err(format!(
                "Unknown backend type: {}. Valid: openai_compatible, google, cohere",
                other
            )),
        }
    }
}

/// Static configuration for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    /// Identifier referenced by agents (e.g., "groq")
    pub id: String,
    /// Human-readable name (e.g., "Groq")
    pub display_name: String,
    /// Backend wire family
    pub backend: BackendType,
    /// API base URL
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Model used when this provider stands in for another one
    pub default_model: String,
    /// Models offered by this provider
    pub models: Vec<String>,
    /// Requests allowed in any trailing 60 seconds
    pub rpm_limit: u32,
    /// Requests allowed in any trailing 24 hours
    pub rpd_limit: u32,
}

impl ProviderSpec {
    /// Default per-minute limit for providers without explicit limits
    pub const DEFAULT_RPM: u32 = 60;
    /// Default per-day limit for providers without explicit limits
    pub const DEFAULT_RPD: u32 = 10_000;

    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        backend: BackendType,
        default_model: impl Into<String>,
    ) -> Self {
        let default_model = default_model.into();
        Self {
            id: id.into(),
            display_name: display_name.into(),
            backend,
            base_url: String::new(),
            api_key_env: String::new(),
            models: vec![default_model.clone()],
            default_model,
            rpm_limit: Self::DEFAULT_RPM,
            rpd_limit: Self::DEFAULT_RPD,
        }
    }

    pub fn with_limits(mut self, rpm_limit: u32, rpd_limit: u32) -> Self {
        self.rpm_limit = rpm_limit;
        self.rpd_limit = rpd_limit;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key_env(mut self, env: impl Into<String>) -> Self {
        self.api_key_env = env.into();
        self
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    /// Built-in provider table, in fallback scan order.
    pub fn defaults() -> Vec<ProviderSpec> {
        fn models(list: &[&str]) -> Vec<String> {
            list.iter().map(|m| m.to_string()).collect()
        }

        vec![
            ProviderSpec::new(
                "groq",
                "Groq",
                BackendType::OpenAiCompatible,
                "llama-3.3-70b-versatile",
            )
            .with_base_url("https://api.groq.com/openai/v1")
            .with_api_key_env("GROQ_API_KEY")
            .with_models(models(&[
                "llama-3.3-70b-versatile",
                "llama-3.1-8b-instant",
                "mixtral-8x7b-32768",
                "gemma2-9b-it",
            ]))
            .with_limits(30, 14_400),
            ProviderSpec::new(
                "google",
                "Google AI Studio",
                BackendType::Google,
                "gemini-2.0-flash",
            )
            .with_base_url("https://generativelanguage.googleapis.com/v1beta/models")
            .with_api_key_env("GOOGLE_API_KEY")
            .with_models(models(&[
                "gemini-2.0-flash",
                "gemini-1.5-flash",
                "gemini-1.5-pro",
            ]))
            .with_limits(15, 1_500),
            ProviderSpec::new(
                "openrouter",
                "OpenRouter",
                BackendType::OpenAiCompatible,
                "mistralai/mistral-7b-instruct:free",
            )
            .with_base_url("https://openrouter.ai/api/v1")
            .with_api_key_env("OPENROUTER_API_KEY")
            .with_models(models(&[
                "mistralai/mistral-7b-instruct:free",
                "meta-llama/llama-3.2-3b-instruct:free",
                "google/gemma-3-4b-it:free",
                "deepseek/deepseek-r1:free",
            ]))
            .with_limits(20, 200),
            ProviderSpec::new(
                "cerebras",
                "Cerebras",
                BackendType::OpenAiCompatible,
                "llama3.1-70b",
            )
            .with_base_url("https://api.cerebras.ai/v1")
            .with_api_key_env("CEREBRAS_API_KEY")
            .with_models(models(&["llama3.1-70b", "llama3.1-8b"]))
            .with_limits(30, 1_000),
            ProviderSpec::new("cohere", "Cohere", BackendType::Cohere, "command-r-plus")
                .with_base_url("https://api.cohere.ai")
                .with_api_key_env("COHERE_API_KEY")
                .with_models(models(&["command-r-plus", "command-r", "command"]))
                .with_limits(20, 1_000),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_type_parse() {
        assert_eq!(
            "openai_compatible".parse::<BackendType>().unwrap(),
            BackendType::OpenAiCompatible
        );
        assert_eq!("Google".parse::<BackendType>().unwrap(), BackendType::Google);
        assert!("smoke-signals".parse::<BackendType>().is_err());
    }

    #[test]
    fn test_new_uses_default_limits() {
        let spec = ProviderSpec::new("x", "X", BackendType::Cohere, "m");
        assert_eq!(spec.rpm_limit, ProviderSpec::DEFAULT_RPM);
        assert_eq!(spec.rpd_limit, ProviderSpec::DEFAULT_RPD);
        assert_eq!(spec.models, vec!["m".to_string()]);
    }

    #[test]
    fn test_defaults_order_and_limits() {
        let defaults = ProviderSpec::defaults();
        let ids: Vec<_> = defaults.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["groq", "google", "openrouter", "cerebras", "cohere"]);

        let openrouter = &defaults[2];
        assert_eq!(openrouter.rpm_limit, 20);
        assert_eq!(openrouter.rpd_limit, 200);
    }
}
