//! Provider table from TOML (`[[providers]]` array)
//!
//! Declaration order is the fallback scan order. Declaring any
//! `[[providers]]` entry replaces the built-in table.

use council_domain::{BackendType, ProviderSpec};
use serde::{Deserialize, Serialize};

/// One provider entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Identifier referenced by agents
    pub id: String,
    /// Display name
    pub name: String,
    /// Backend wire family: "openai_compatible", "google" or "cohere"
    #[serde(rename = "type")]
    pub backend: String,
    /// API base URL
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Model used when this provider substitutes for another
    pub default_model: String,
    /// Models offered (informational)
    pub models: Vec<String>,
    /// Requests per minute
    pub rpm_limit: u32,
    /// Requests per day
    pub rpd_limit: u32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            backend: BackendType::OpenAiCompatible.as_str().to_string(),
            base_url: String::new(),
            api_key_env: String::new(),
            default_model: String::new(),
            models: Vec::new(),
            rpm_limit: ProviderSpec::DEFAULT_RPM,
            rpd_limit: ProviderSpec::DEFAULT_RPD,
        }
    }
}

impl From<&ProviderSpec> for FileProviderConfig {
    fn from(spec: &ProviderSpec) -> Self {
        Self {
            id: spec.id.clone(),
            name: spec.display_name.clone(),
            backend: spec.backend.as_str().to_string(),
            base_url: spec.base_url.clone(),
            api_key_env: spec.api_key_env.clone(),
            default_model: spec.default_model.clone(),
            models: spec.models.clone(),
            rpm_limit: spec.rpm_limit,
            rpd_limit: spec.rpd_limit,
        }
    }
}

impl FileProviderConfig {
    /// Parse the backend type string
    pub fn parse_backend(&self) -> Result<BackendType, String> {
        self.backend.parse()
    }

    /// Convert to the domain type; `None` when the backend type is invalid
    pub fn to_spec(&self) -> Option<ProviderSpec> {
        let backend = self.parse_backend().ok()?;
        let name = if self.name.is_empty() {
            self.id.clone()
        } else {
            self.name.clone()
        };

        let mut spec = ProviderSpec::new(&self.id, name, backend, &self.default_model)
            .with_limits(self.rpm_limit, self.rpd_limit)
            .with_base_url(&self.base_url)
            .with_api_key_env(&self.api_key_env);
        if !self.models.is_empty() {
            spec = spec.with_models(self.models.clone());
        }
        Some(spec)
    }
}

/// Built-in provider table
pub fn default_providers() -> Vec<FileProviderConfig> {
    ProviderSpec::defaults().iter().map(Into::into).collect()
}
