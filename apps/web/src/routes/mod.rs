pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::conversation::handlers::handle_get_conversation;
use crate::frontend::frontend_router;
use crate::presentation::handlers::handle_get_cards;
use crate::state::AppState;
use crate::strategy::handlers::handle_submit_strategy;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Strategy API
        .route(
            "/api/v1/strategy",
            post(handle_submit_strategy).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/api/v1/conversation", get(handle_get_conversation))
        .route("/api/v1/cards", get(handle_get_cards))
        .merge(frontend_router::<AppState>())
        .with_state(state)
}
