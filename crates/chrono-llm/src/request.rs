//! Wire types for chat-completion requests

use serde::{Deserialize, Serialize};

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Fixed instructions
    System,
    /// Caller-supplied content
    User,
}

/// A single `{role, content}` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who the message is from
    pub role: Role,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request payload sent to a completion provider
///
/// Serializes to the chat-completions shape:
/// `{"model": ..., "messages": [...], "temperature": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Model identifier
    pub model: String,

    /// Ordered messages
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature
    pub temperature: f64,
}

impl ExtractionRequest {
    /// Content of the first system message
    pub fn system_content(&self) -> Option<&str> {
        self.content_for(Role::System)
    }

    /// Content of the first user message
    pub fn user_content(&self) -> Option<&str> {
        self.content_for(Role::User)
    }

    fn content_for(&self, role: Role) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }
}
