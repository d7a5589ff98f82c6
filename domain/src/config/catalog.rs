//! Read-only provider and role catalog

use crate::agent::entities::Agent;
use crate::agent::role::{Role, RoleSpec};
use crate::core::error::DomainError;
use crate::providers::ProviderSpec;

/// Static provider and role configuration consumed by the debate engine.
///
/// Provider order is significant: it is the order in which fallback
/// candidates are scanned. Adding a provider or a role only requires adding
/// an entry here; nothing else names them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouncilCatalog {
    providers: Vec<ProviderSpec>,
    roles: Vec<RoleSpec>,
}

impl Default for CouncilCatalog {
    fn default() -> Self {
        Self::new(ProviderSpec::defaults(), RoleSpec::defaults())
    }
}

impl CouncilCatalog {
    pub fn new(providers: Vec<ProviderSpec>, roles: Vec<RoleSpec>) -> Self {
        Self { providers, roles }
    }

    /// Providers in declaration order
    pub fn providers(&self) -> &[ProviderSpec] {
        &self.providers
    }

    pub fn roles(&self) -> &[RoleSpec] {
        &self.roles
    }

    pub fn provider(&self, id: &str) -> Option<&ProviderSpec> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn role(&self, role: &Role) -> Option<&RoleSpec> {
        self.roles.iter().find(|r| &r.role == role)
    }

    /// System prompt for a role, if the role is configured
    pub fn system_prompt(&self, role: &Role) -> Option<&str> {
        self.role(role).map(|r| r.system_prompt.as_str())
    }

    /// Display label for a role, falling back to the role id
    pub fn role_label<'a>(&'a self, role: &'a Role) -> &'a str {
        self.role(role)
            .map(|r| r.label.as_str())
            .unwrap_or_else(|| role.as_str())
    }

    /// Check that every agent references a known provider and role.
    ///
    /// Returns the first problem found, in roster order.
    pub fn validate_roster(&self, agents: &[Agent]) -> Result<(), DomainError> {
        if agents.is_empty() {
            return Err(DomainError::EmptyRoster);
        }

        for agent in agents {
            if self.provider(&agent.provider).is_none() {
                return Err(DomainError::UnknownProvider {
                    agent: agent.name.clone(),
                    provider: agent.provider.clone(),
                });
            }
            if self.role(&agent.role).is_none() {
                return Err(DomainError::UnknownRole {
                    agent: agent.name.clone(),
                    role: agent.role.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_lookups() {
        let catalog = CouncilCatalog::default();
        assert_eq!(catalog.provider("google").unwrap().display_name, "Google AI Studio");
        assert!(catalog.provider("missing").is_none());
        assert!(catalog.system_prompt(&Role::Judge).unwrap().contains("judge"));
        assert_eq!(catalog.role_label(&Role::SecurityAuditor), "Security Auditor");
    }

    #[test]
    fn test_role_label_falls_back_to_id() {
        let catalog = CouncilCatalog::default();
        let role = Role::Custom("economist".to_string());
        assert_eq!(catalog.role_label(&role), "economist");
    }

    #[test]
    fn test_validate_default_council() {
        let catalog = CouncilCatalog::default();
        assert!(catalog.validate_roster(&Agent::default_council()).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_roster() {
        let catalog = CouncilCatalog::default();
        assert_eq!(catalog.validate_roster(&[]), Err(DomainError::EmptyRoster));
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let catalog = CouncilCatalog::default();
        let agents = vec![Agent::new("a", "A", Role::Thinker, "nowhere", "m")];
        assert!(matches!(
            catalog.validate_roster(&agents),
            Err(DomainError::UnknownProvider { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_role() {
        let catalog = CouncilCatalog::default();
        let agents = vec![Agent::new(
            "a",
            "A",
            Role::Custom("economist".to_string()),
            "groq",
            "m",
        )];
        assert!(matches!(
            catalog.validate_roster(&agents),
            Err(DomainError::UnknownRole { .. })
        ));
    }
}
