use serde::{Deserialize, Serialize};

use crate::conversation::prompts::STRATEGY_SYSTEM_PROMPT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered message log for one session.
///
/// Always starts with exactly one system message carrying
/// `STRATEGY_SYSTEM_PROMPT`. Messages are only ever appended; the log is never
/// trimmed, so the full history is re-sent on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationState {
    messages: Vec<Message>,
}

#[allow(clippy::len_without_is_empty)]
impl ConversationState {
    /// Opens a conversation with the fixed instructions followed by the first
    /// user message.
    pub fn start(first_user_message: Message) -> Self {
        Self {
            messages: vec![Message::system(STRATEGY_SYSTEM_PROMPT), first_user_message],
        }
    }

    pub fn append(mut self, message: Message) -> Self {
        self.push(message);
        self
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}
