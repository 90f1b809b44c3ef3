//! Embedded static frontend assets.
//!
//! The HTML, CSS, JS and card artwork from `frontend/` are compiled into the
//! binary using `include_str!`.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

const INDEX_HTML: &str = include_str!("../frontend/index.html");
const STYLE_CSS: &str = include_str!("../frontend/style.css");
const APP_JS: &str = include_str!("../frontend/app.js");

const CARD_IMAGES: &[(&str, &str)] = &[
    ("guide.svg", include_str!("../frontend/cards/guide.svg")),
    ("templates.svg", include_str!("../frontend/cards/templates.svg")),
    ("course.svg", include_str!("../frontend/cards/course.svg")),
    ("print.svg", include_str!("../frontend/cards/print.svg")),
];

/// Build a router that serves the embedded frontend.
pub fn frontend_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index_handler))
        .route("/static/style.css", get(css_handler))
        .route("/static/app.js", get(js_handler))
        .route("/static/cards/:name", get(card_image_handler))
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn css_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLE_CSS,
    )
        .into_response()
}

async fn js_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
        .into_response()
}

async fn card_image_handler(Path(name): Path<String>) -> Response {
    match card_image(&name) {
        Some(svg) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/svg+xml")],
            svg,
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn card_image(name: &str) -> Option<&'static str> {
    CARD_IMAGES
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, svg)| *svg)
}
