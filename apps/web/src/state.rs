use std::sync::Arc;

use crate::config::Config;
use crate::conversation::sessions::SessionStore;
use crate::extraction::PageTextReader;
use crate::llm_client::ChatCompleter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat completion backend. Production: `LlmClient`.
    pub llm: Arc<dyn ChatCompleter>,
    /// PDF page reader. Production: `PdfExtractReader`.
    pub extractor: Arc<dyn PageTextReader>,
    pub sessions: SessionStore,
    pub config: Config,
}
