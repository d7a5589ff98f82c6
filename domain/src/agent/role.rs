//! Role value object and role configuration

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role an agent plays in the debate (Value Object)
///
/// Only thinker, critic, and judge have dedicated phases. Every other role
/// (built-in or custom) takes part in the specialist phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Thinker,
    Critic,
    Judge,
    Researcher,
    SecurityAuditor,
    Custom(String),
}

impl Role {
    /// Get the string identifier for this role
    pub fn as_str(&self) -> &str {
        match self {
            Role::Thinker => "thinker",
            Role::Critic => "critic",
            Role::Judge => "judge",
            Role::Researcher => "researcher",
            Role::SecurityAuditor => "security_auditor",
            Role::Custom(s) => s,
        }
    }

    /// Resolve a role from its string identifier; unknown ids become [`Role::Custom`]
    pub fn from_id(id: &str) -> Self {
        match id {
            "thinker" => Role::Thinker,
            "critic" => Role::Critic,
            "judge" => Role::Judge,
            "researcher" => Role::Researcher,
            "security_auditor" => Role::SecurityAuditor,
            other => Role::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Role::from_id(s))
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Role::from_id(&s))
    }
}

/// Static configuration for a role: its system prompt and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSpec {
    /// Role this entry configures
    pub role: Role,
    /// Human-readable label (e.g., "Security Auditor")
    pub label: String,
    /// Icon shown by the presentation layer
    pub icon: String,
    /// System prompt sent as the first turn of every call for this role
    pub system_prompt: String,
}

impl RoleSpec {
    pub fn new(role: Role, label: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            role,
            label: label.into(),
            icon: String::new(),
            system_prompt: system_prompt.into(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Built-in role table.
    pub fn defaults() -> Vec<RoleSpec> {
        vec![
            RoleSpec::new(
                Role::Thinker,
                "Thinker",
                "You are a creative and analytical thinker. Your job is to propose \
                 thoughtful, well-reasoned solutions to the question. Be specific, \
                 practical, and clear. Structure your answer with clear headings \
                 when appropriate.",
            )
            .with_icon("💡"),
            RoleSpec::new(
                Role::Critic,
                "Critic",
                "You are a rigorous critic and challenger. Your job is to find flaws, \
                 weaknesses, and oversights in proposed solutions. Propose better \
                 alternatives where possible. Be constructive but direct.",
            )
            .with_icon("🔍"),
            RoleSpec::new(
                Role::Judge,
                "Judge",
                "You are an impartial judge reviewing a debate. Analyse both sides \
                 fairly. Score each participant 1-10, declare a winner or consensus, \
                 and give a concise final verdict with the best answer synthesised \
                 from the debate.",
            )
            .with_icon("⚖️"),
            RoleSpec::new(
                Role::Researcher,
                "Researcher",
                "You are a thorough researcher. Your job is to provide relevant \
                 background information, cite known facts, and surface edge cases \
                 or considerations that others may have missed.",
            )
            .with_icon("🔬"),
            RoleSpec::new(
                Role::SecurityAuditor,
                "Security Auditor",
                "You are a security auditor. Analyse proposed solutions for security \
                 vulnerabilities, privacy concerns, and potential abuse vectors. \
                 Suggest mitigations for any issues you find.",
            )
            .with_icon("🛡️"),
        ]
    }
}
