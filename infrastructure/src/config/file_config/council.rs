//! Council roster from TOML (`[[council.agents]]`)

use council_domain::{Agent, Role};
use serde::{Deserialize, Serialize};

/// One agent entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub id: String,
    pub name: String,
    pub role: String,
    pub provider: String,
    pub model: String,
}

impl FileAgentConfig {
    pub fn to_agent(&self) -> Agent {
        let name = if self.name.is_empty() {
            self.id.clone()
        } else {
            self.name.clone()
        };
        Agent::new(
            &self.id,
            name,
            Role::from_id(&self.role),
            &self.provider,
            &self.model,
        )
    }
}

impl From<&Agent> for FileAgentConfig {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            name: agent.name.clone(),
            role: agent.role.as_str().to_string(),
            provider: agent.provider.clone(),
            model: agent.model.clone(),
        }
    }
}

/// Raw council configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Roster in debate order
    pub agents: Vec<FileAgentConfig>,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            agents: Agent::default_council().iter().map(Into::into).collect(),
        }
    }
}

impl FileCouncilConfig {
    pub fn to_agents(&self) -> Vec<Agent> {
        self.agents.iter().map(FileAgentConfig::to_agent).collect()
    }
}
