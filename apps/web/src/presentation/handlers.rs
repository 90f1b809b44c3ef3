use axum::{extract::State, Json};

use crate::presentation::cards::{IdeaCard, IDEA_CARDS};
use crate::state::AppState;

/// GET /api/v1/cards
///
/// Empty when idea cards are switched off.
pub async fn handle_get_cards(State(state): State<AppState>) -> Json<&'static [IdeaCard]> {
    let cards: &'static [IdeaCard] = if state.config.show_idea_cards {
        IDEA_CARDS
    } else {
        &[]
    };
    Json(cards)
}
