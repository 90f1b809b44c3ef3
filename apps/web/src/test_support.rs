//! Fakes shared by unit and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::conversation::models::Message;
use crate::conversation::sessions::SessionStore;
use crate::extraction::PageTextReader;
use crate::llm_client::{ChatCompleter, LlmError};
use crate::state::AppState;

/// Records every history it is sent and replies "Plan #N".
#[derive(Default)]
pub struct RecordingCompleter {
    pub calls: Mutex<Vec<Vec<Message>>>,
}

impl RecordingCompleter {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatCompleter for RecordingCompleter {
    async fn complete(&self, messages: &[Message], _model: &str) -> Result<String, LlmError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(messages.to_vec());
        Ok(format!("Plan #{}", calls.len()))
    }
}

/// Always fails the way a throttled provider does.
pub struct RateLimitedCompleter;

#[async_trait]
impl ChatCompleter for RateLimitedCompleter {
    async fn complete(&self, _messages: &[Message], _model: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 429,
            message: "rate_limited".to_string(),
        })
    }
}

/// Returns fixed page texts and counts how often it was asked.
pub struct FixedPages {
    pages: Vec<&'static str>,
    calls: AtomicUsize,
}

impl FixedPages {
    pub fn new(pages: Vec<&'static str>) -> Self {
        Self {
            pages,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PageTextReader for FixedPages {
    fn page_texts(&self, _document: &[u8]) -> Result<Vec<String>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages.iter().map(|p| p.to_string()).collect())
    }
}

pub fn test_config() -> Config {
    Config {
        openai_api_key: "sk-test".to_string(),
        openai_base_url: "http://127.0.0.1:9/v1".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        show_idea_cards: true,
        session_idle_ttl_secs: 3600,
        max_upload_bytes: 1024 * 1024,
    }
}

pub fn test_state(llm: Arc<dyn ChatCompleter>, extractor: Arc<dyn PageTextReader>) -> AppState {
    AppState {
        llm,
        extractor,
        sessions: SessionStore::new(3600),
        config: test_config(),
    }
}
