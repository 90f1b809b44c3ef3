//! Prompt assembly: merges a submission into the session's conversation.

use crate::conversation::models::{ConversationState, Message};

/// Adds `raw_input` (trimmed) to the conversation as a user message.
///
/// Without prior state a new conversation is opened with the fixed system
/// prompt. With prior state the message is appended; the first user message
/// stays pinned as message #2 for the whole session.
///
/// Callers must not pass empty input.
pub fn assemble(prior: Option<ConversationState>, raw_input: &str) -> (ConversationState, Message) {
    let latest = Message::user(raw_input.trim());

    let state = match prior {
        None => ConversationState::start(latest.clone()),
        Some(state) => state.append(latest.clone()),
    };

    (state, latest)
}
