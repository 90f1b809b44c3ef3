use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::conversation::models::Message;
use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "retiregpt_session";

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub session_id: Option<Uuid>,
    pub initialized: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub messages: Vec<Message>,
}

/// Reads the session id from the `Cookie` header, if present and well-formed.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

/// GET /api/v1/conversation
///
/// Returns the caller's message history. Never creates a session.
pub async fn handle_get_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ConversationResponse>, AppError> {
    let handle = match session_id_from_headers(&headers) {
        Some(id) => state.sessions.get(id).await,
        None => None,
    };

    let Some(handle) = handle else {
        return Ok(Json(ConversationResponse {
            session_id: None,
            initialized: false,
            created_at: None,
            messages: vec![],
        }));
    };

    let session = handle.lock().await;
    Ok(Json(ConversationResponse {
        session_id: Some(session.id),
        initialized: session.is_initialized(),
        created_at: Some(session.created_at),
        messages: session
            .conversation
            .as_ref()
            .map(|c| c.messages().to_vec())
            .unwrap_or_default(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_id_parsed_among_other_cookies() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en")).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_malformed_session_id_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("retiregpt_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);
        assert_eq!(session_id_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_cookie_round_trips_through_header_parser() {
        let id = Uuid::new_v4();
        let set_cookie = session_cookie(id);
        let pair = set_cookie.split(';').next().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(pair).unwrap());
        assert_eq!(session_id_from_headers(&headers), Some(id));
        assert!(set_cookie.contains("HttpOnly"));
    }
}
