//! Axum route handlers for the Strategy API.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::conversation::handlers::{session_cookie, session_id_from_headers};
use crate::errors::AppError;
use crate::extraction::{extract, ExtractedDocument};
use crate::presentation::render::build_view;
use crate::state::AppState;
use crate::strategy::pipeline::{resolve_input, submit};

const RESUME_FIELD: &str = "resume";
const BACKGROUND_FIELD: &str = "background";

/// An uploaded file part.
#[derive(Debug)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
pub struct StrategyForm {
    pub resume: Option<Upload>,
    pub background: String,
}

/// Reads the `resume` file part and the `background` text part. An upload
/// control submitted without a file arrives as an empty part with no filename
/// and is ignored; a named but empty file still goes through extraction.
async fn read_strategy_form(multipart: &mut Multipart) -> Result<StrategyForm, AppError> {
    let mut form = StrategyForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                if bytes.is_empty() && file_name.as_deref().unwrap_or("").is_empty() {
                    continue;
                }
                form.resume = Some(Upload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some(BACKGROUND_FIELD) => {
                form.background = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read background: {e}")))?;
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Runs extraction on the blocking pool; PDF parsing is CPU-bound.
async fn extract_upload(state: &AppState, upload: Upload) -> Result<ExtractedDocument, AppError> {
    let reader = state.extractor.clone();
    info!(
        "Extracting resume upload {:?} ({} bytes, {})",
        upload.file_name.as_deref().unwrap_or("<unnamed>"),
        upload.bytes.len(),
        upload.content_type
    );

    let document = tokio::task::spawn_blocking(move || {
        extract(&upload.bytes, &upload.content_type, reader.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))??;

    Ok(document)
}

/// POST /api/v1/strategy
///
/// Multipart form: optional `resume` PDF, optional `background` text.
/// Document text takes precedence over the text box. Always sets the session
/// cookie once a session exists, including when the LLM request fails.
pub async fn handle_submit_strategy(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_strategy_form(&mut multipart).await?;

    let document = match form.resume {
        Some(upload) => Some(extract_upload(&state, upload).await?),
        None => None,
    };

    let input = resolve_input(document.as_ref(), &form.background).ok_or_else(|| {
        AppError::Validation(
            "Upload a PDF resume or describe your job before submitting.".to_string(),
        )
    })?;

    let (session_id, handle) = state
        .sessions
        .get_or_create(session_id_from_headers(&headers))
        .await;
    info!(
        "Session {session_id}: strategy submission from {:?} ({} chars)",
        input.source,
        input.text.len()
    );

    let result = {
        let mut session = handle.lock().await;
        submit(&mut session, &input.text, state.llm.as_ref()).await
    };

    let cookie = [(header::SET_COOKIE, session_cookie(session_id))];
    let response = match result {
        Ok(outcome) => {
            let view = build_view(
                session_id,
                input.source,
                outcome,
                state.config.show_idea_cards,
            );
            (cookie, Json(view)).into_response()
        }
        Err(e) => (cookie, AppError::from(e)).into_response(),
    };

    Ok(response)
}
