/// LLM Client: the single point of entry for all chat completion calls in RetireGPT.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// All LLM interactions MUST go through this module.
///
/// Model: gpt-4o (hardcoded, not configurable)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::conversation::models::Message;

/// The model used for all strategy requests.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-4o";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned no choices")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Compatible backends may report only some of the counters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, untouched.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Anything that can turn a message history into a reply.
///
/// Carried in `AppState` as `Arc<dyn ChatCompleter>` so handlers can be
/// exercised without a network.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, messages: &[Message], model: &str) -> Result<String, LlmError>;
}

/// The single LLM client used by RetireGPT.
/// Wraps the chat completions API. No retries and no client-side timeout.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        }
    }

    /// Makes a raw call to the chat completions API, returning the full response object.
    /// The whole message history is sent on every call.
    pub async fn call(&self, messages: &[Message], model: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model,
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}", status);
            // Try to parse error message
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

#[async_trait]
impl ChatCompleter for LlmClient {
    async fn complete(&self, messages: &[Message], model: &str) -> Result<String, LlmError> {
        let response = self.call(messages, model).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::sync::Mutex;

    use crate::conversation::models::Role;

    #[derive(Clone, Default)]
    struct MockProvider {
        hits: Arc<AtomicUsize>,
        last_body: Arc<Mutex<Option<Value>>>,
        last_auth: Arc<Mutex<Option<String>>>,
    }

    /// Starts a local chat completions stand-in and returns its base URL.
    async fn spawn_provider(status: StatusCode, reply: Value) -> (String, MockProvider) {
        let mock = MockProvider::default();
        let app = Router::new()
            .route(
                "/v1/chat/completions",
                post(
                    move |State(mock): State<MockProvider>,
                          headers: axum::http::HeaderMap,
                          Json(body): Json<Value>| {
                        let reply = reply.clone();
                        async move {
                            mock.hits.fetch_add(1, Ordering::SeqCst);
                            *mock.last_body.lock().await = Some(body);
                            *mock.last_auth.lock().await = headers
                                .get("authorization")
                                .and_then(|v| v.to_str().ok())
                                .map(String::from);
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(mock.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/v1"), mock)
    }

    fn history() -> Vec<Message> {
        vec![
            Message::system("You are RetireGPT"),
            Message::user("Office manager, 22 years"),
            Message::assistant("Part 1: ..."),
            Message::user("unlock"),
        ]
    }

    #[tokio::test]
    async fn test_sends_full_history_and_returns_first_choice() {
        let (base_url, mock) = spawn_provider(
            StatusCode::OK,
            json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "**Your plan**"}},
                    {"message": {"role": "assistant", "content": "ignored"}}
                ],
                "usage": {"prompt_tokens": 120, "completion_tokens": 40}
            }),
        )
        .await;

        let client = LlmClient::new("sk-test".to_string(), &base_url);
        let reply = client.complete(&history(), MODEL).await.unwrap();
        assert_eq!(reply, "**Your plan**");

        let body = mock.last_body.lock().await.clone().unwrap();
        assert_eq!(body["model"], MODEL);
        let sent = body["messages"].as_array().unwrap();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0]["role"], Role::System.as_str());
        assert_eq!(sent[3]["content"], "unlock");
        assert_eq!(
            mock.last_auth.lock().await.as_deref(),
            Some("Bearer sk-test")
        );
    }

    #[tokio::test]
    async fn test_provider_error_is_not_retried() {
        let (base_url, mock) = spawn_provider(
            StatusCode::TOO_MANY_REQUESTS,
            json!({"error": {"message": "rate_limited", "type": "requests"}}),
        )
        .await;

        let client = LlmClient::new("sk-test".to_string(), &base_url);
        let err = client.complete(&history(), MODEL).await.unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate_limited");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(mock.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_auth_failure_surfaces_status() {
        let (base_url, _) = spawn_provider(
            StatusCode::UNAUTHORIZED,
            json!({"error": {"message": "Incorrect API key provided"}}),
        )
        .await;

        let client = LlmClient::new("sk-wrong".to_string(), &base_url);
        let err = client.complete(&history(), MODEL).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_empty_choices_is_empty_content() {
        let (base_url, _) = spawn_provider(StatusCode::OK, json!({"choices": []})).await;

        let client = LlmClient::new("sk-test".to_string(), &base_url);
        let err = client.complete(&history(), MODEL).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_partial_usage_is_accepted() {
        let (base_url, _) = spawn_provider(
            StatusCode::OK,
            json!({
                "choices": [{"message": {"content": "plan"}}],
                "usage": {"prompt_tokens": 5}
            }),
        )
        .await;

        let client = LlmClient::new("sk-test".to_string(), &base_url);
        let reply = client.complete(&history(), MODEL).await.unwrap();
        assert_eq!(reply, "plan");
    }

    #[test]
    fn test_usage_missing_counters_default_to_zero() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "plan"}}],
            "usage": {"completion_tokens": 9}
        }))
        .unwrap();
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.completion_tokens, 9);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = LlmClient::new("sk-test".to_string(), &format!("http://{addr}/v1"));
        let err = client.complete(&history(), MODEL).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = LlmClient::new("k".to_string(), "https://api.openai.com/v1/");
        assert_eq!(client.endpoint, "https://api.openai.com/v1/chat/completions");
    }
}
