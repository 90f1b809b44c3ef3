//! Submission pipeline: resolve input -> assemble -> request -> record reply.
//!
//! The user message is stored in the session before the request goes out, so a
//! failed request leaves it in the history with no assistant reply after it.

use serde::Serialize;
use tracing::info;

use crate::conversation::assembler::assemble;
use crate::conversation::models::Message;
use crate::conversation::sessions::Session;
use crate::extraction::ExtractedDocument;
use crate::llm_client::{ChatCompleter, MODEL};
use crate::strategy::requester::{request_completion, RequestError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Document,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInput {
    pub text: String,
    pub source: InputSource,
}

#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub input_echo: String,
    pub reply: String,
    pub message_count: usize,
}

/// Picks the text to submit. Document text wins whenever it is non-empty; the
/// text box is only used when there is no document or it had no text.
/// Returns `None` when both are empty.
pub fn resolve_input(document: Option<&ExtractedDocument>, typed: &str) -> Option<ResolvedInput> {
    if let Some(document) = document.filter(|d| !d.is_empty()) {
        return Some(ResolvedInput {
            text: document.combined_text.trim().to_string(),
            source: InputSource::Document,
        });
    }

    let typed = typed.trim();
    if typed.is_empty() {
        return None;
    }
    Some(ResolvedInput {
        text: typed.to_string(),
        source: InputSource::Text,
    })
}

/// Runs one submission against `session`. `input` must be non-empty.
pub async fn submit(
    session: &mut Session,
    input: &str,
    completer: &dyn ChatCompleter,
) -> Result<SubmissionOutcome, RequestError> {
    session.touch();

    let (state, latest) = assemble(session.conversation.take(), input);
    info!(
        "Session {}: submitting strategy request with {} messages",
        session.id,
        state.len()
    );
    let conversation = session.conversation.insert(state);

    let reply = request_completion(completer, conversation.messages(), MODEL).await?;

    conversation.push(Message::assistant(reply.clone()));
    let message_count = conversation.len();
    session.touch();

    info!(
        "Session {}: strategy ready ({} messages in history)",
        session.id, message_count
    );

    Ok(SubmissionOutcome {
        input_echo: latest.content,
        reply,
        message_count,
    })
}
