// Conversation engine: message log, prompt assembly, and per-session state.
// The session store owns every ConversationState; nothing else holds one.

pub mod assembler;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod sessions;
