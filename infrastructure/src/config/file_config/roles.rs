//! Role table from TOML (`[roles.<id>]` tables)
//!
//! Entries merge key-wise with the built-in roles, so a config file can
//! add a role or override one prompt without restating the rest.

use council_domain::{Role, RoleSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One role entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoleConfig {
    pub label: String,
    pub system_prompt: String,
    pub icon: String,
}

impl FileRoleConfig {
    pub fn to_spec(&self, id: &str) -> RoleSpec {
        let label = if self.label.is_empty() {
            id.to_string()
        } else {
            self.label.clone()
        };
        RoleSpec::new(Role::from_id(id), label, &self.system_prompt).with_icon(&self.icon)
    }
}

/// Built-in role table keyed by role id
pub fn default_roles() -> BTreeMap<String, FileRoleConfig> {
    RoleSpec::defaults()
        .into_iter()
        .map(|spec| {
            (
                spec.role.as_str().to_string(),
                FileRoleConfig {
                    label: spec.label,
                    system_prompt: spec.system_prompt,
                    icon: spec.icon,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keyed_by_id() {
        let roles = default_roles();
        assert!(roles.contains_key("security_auditor"));
        let spec = roles["critic"].to_spec("critic");
        assert_eq!(spec.role, Role::Critic);
        assert_eq!(spec.label, "Critic");
    }

    #[test]
    fn test_custom_role_spec() {
        let entry = FileRoleConfig {
            system_prompt: "You weigh costs.".to_string(),
            ..Default::default()
        };
        let spec = entry.to_spec("economist");
        assert_eq!(spec.role, Role::Custom("economist".to_string()));
        assert_eq!(spec.label, "economist");
    }
}
