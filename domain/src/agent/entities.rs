//! Agent entity

use super::role::Role;
use serde::{Deserialize, Serialize};

/// A single council member (Entity)
///
/// Agents are owned by the caller and are immutable for the duration of a
/// debate. The engine only reads them.
///
/// # Example
///
/// ```
/// use council_domain::{Agent, Role};
///
/// let agent = Agent::new("thinker1", "Thinker 1", Role::Thinker, "groq", "llama-3.3-70b-versatile");
/// assert_eq!(agent.role, Role::Thinker);
/// assert_eq!(agent.provider, "groq");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identifier (unique within a roster)
    pub id: String,
    /// Display name, also used as the speaker label in the debate history
    pub name: String,
    /// Role in the debate
    pub role: Role,
    /// Provider identifier from the catalog (e.g., "groq")
    pub provider: String,
    /// Backend-specific model name
    pub model: String,
}

impl Agent {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            provider: provider.into(),
            model: model.into(),
        }
    }
}

impl Agent {
    /// The built-in three-member council: one thinker, one critic, one judge,
    /// each on a different provider.
    pub fn default_council() -> Vec<Agent> {
        vec![
            Agent::new(
                "thinker1",
                "Thinker 1",
                Role::Thinker,
                "groq",
                "llama-3.3-70b-versatile",
            ),
            Agent::new(
                "thinker2",
                "Thinker 2 (Critic)",
                Role::Critic,
                "google",
                "gemini-2.0-flash",
            ),
            Agent::new(
                "judge",
                "Judge",
                Role::Judge,
                "openrouter",
                "mistralai/mistral-7b-instruct:free",
            ),
        ]
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{} · {} / {}]",
            self.name, self.role, self.provider, self.model
        )
    }
}
