//! Conversation turns sent through the gateway

use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    System,
    User,
    AgentReply,
}

/// A single turn of the conversation passed to a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub kind: TurnKind,
    pub content: String,
}

impl ConversationTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            kind: TurnKind::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            kind: TurnKind::User,
            content: content.into(),
        }
    }

    pub fn agent_reply(content: impl Into<String>) -> Self {
        Self {
            kind: TurnKind::AgentReply,
            content: content.into(),
        }
    }
}
