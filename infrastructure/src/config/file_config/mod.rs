//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain types once
//! validated.

mod attachments;
mod council;
mod debate;
mod logging;
mod output;
mod providers;
mod roles;

pub use attachments::FileAttachmentsConfig;
pub use council::{FileAgentConfig, FileCouncilConfig};
pub use debate::FileDebateConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use providers::{FileProviderConfig, default_providers};
pub use roles::{FileRoleConfig, default_roles};

use council_domain::{Agent, ConfigIssue, ConfigIssueCode, CouncilCatalog, Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Configuration rejected by [`FileConfig::validate`]
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid configuration:\n  {}", .0.iter().map(|i| i.message.as_str()).collect::<Vec<_>>().join("\n  "))]
    Invalid(Vec<ConfigIssue>),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Provider table in fallback scan order
    pub providers: Vec<FileProviderConfig>,
    /// Role table keyed by role id
    pub roles: BTreeMap<String, FileRoleConfig>,
    /// Default roster
    pub council: FileCouncilConfig,
    /// Debate loop settings
    pub debate: FileDebateConfig,
    /// Attachment limits
    pub attachments: FileAttachmentsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            roles: default_roles(),
            council: FileCouncilConfig::default(),
            debate: FileDebateConfig::default(),
            attachments: FileAttachmentsConfig::default(),
            output: FileOutputConfig::default(),
            logging: FileLoggingConfig::default(),
        }
    }
}

impl FileConfig {
    /// Validate the configuration against `agents`, returning all detected issues.
    ///
    /// `agents` is the roster that will actually debate; it may come from
    /// the command line instead of `[council]`.
    pub fn validate_with(&self, agents: &[Agent]) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Provider table
        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert(provider.id.as_str()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateProvider {
                        id: provider.id.clone(),
                    },
                    format!("providers: '{}' is declared more than once", provider.id),
                ));
            }
            if let Err(e) = provider.parse_backend() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidEnumValue {
                        field: format!("providers.{}.type", provider.id),
                        value: provider.backend.clone(),
                        valid_values: vec![
                            "openai_compatible".to_string(),
                            "google".to_string(),
                            "cohere".to_string(),
                        ],
                    },
                    format!("providers.{}: {}", provider.id, e),
                ));
            }
            if provider.rpm_limit == 0 || provider.rpd_limit == 0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::ZeroRateLimit {
                        provider: provider.id.clone(),
                    },
                    format!(
                        "providers.{}: a zero rate limit means it will never be called",
                        provider.id
                    ),
                ));
            }
        }

        // 2. Roster references
        if agents.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyRoster,
                "council: no agents configured",
            ));
        }
        for agent in agents {
            if !self.providers.iter().any(|p| p.id == agent.provider) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownProvider {
                        agent: agent.name.clone(),
                        provider: agent.provider.clone(),
                    },
                    format!(
                        "agent '{}': unknown provider '{}'",
                        agent.name, agent.provider
                    ),
                ));
            }
            if !self.roles.contains_key(agent.role.as_str()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownRole {
                        agent: agent.name.clone(),
                        role: agent.role.to_string(),
                    },
                    format!("agent '{}': unknown role '{}'", agent.name, agent.role),
                ));
            }
        }

        // 3. Debate settings
        if self.debate.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidTimeout,
                "debate.timeout_seconds cannot be 0",
            ));
        }
        issues.extend(self.debate.parse_consensus().1);

        issues
    }

    /// Validate with the configured `[council]` roster
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.validate_with(&self.to_agents())
    }

    /// Fail on any error-severity issue; return the warnings otherwise
    pub fn check(&self, agents: &[Agent]) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let (errors, warnings): (Vec<_>, Vec<_>) = self
            .validate_with(agents)
            .into_iter()
            .partition(ConfigIssue::is_error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigValidationError::Invalid(errors))
        }
    }

    /// Read-only catalog for the engine; entries with an invalid backend are skipped
    pub fn to_catalog(&self) -> CouncilCatalog {
        let providers = self
            .providers
            .iter()
            .filter_map(FileProviderConfig::to_spec)
            .collect();
        let roles = self
            .roles
            .iter()
            .map(|(id, role)| role.to_spec(id))
            .collect();
        CouncilCatalog::new(providers, roles)
    }

    pub fn to_agents(&self) -> Vec<Agent> {
        self.council.to_agents()
    }

    /// Label configured for `role`
    pub fn role_label(&self, role: &Role) -> Option<&str> {
        self.roles.get(role.as_str()).map(|r| r.label.as_str())
    }
}
