//! Strategy Requester: one completion call per submission, no retries.

use thiserror::Error;
use tracing::{debug, warn};

use crate::conversation::models::Message;
use crate::llm_client::{ChatCompleter, LlmError};

/// A failed completion request. The cause is shown to the user as-is.
#[derive(Debug, Error)]
#[error("Strategy request failed: {0}")]
pub struct RequestError(pub String);

impl From<LlmError> for RequestError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Api { message, .. } => RequestError(message),
            other => RequestError(other.to_string()),
        }
    }
}

/// Sends the full message history and returns the first choice's content
/// verbatim. The reply is not checked for the three-part structure.
pub async fn request_completion(
    completer: &dyn ChatCompleter,
    messages: &[Message],
    model: &str,
) -> Result<String, RequestError> {
    let payload_chars: usize = messages.iter().map(|m| m.content.len()).sum();
    debug!(
        "Requesting completion: model={}, messages={}, payload_chars={}",
        model,
        messages.len(),
        payload_chars
    );

    completer.complete(messages, model).await.map_err(|e| {
        warn!("Completion request failed: {e}");
        RequestError::from(e)
    })
}
