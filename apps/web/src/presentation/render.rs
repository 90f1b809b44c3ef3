//! Strategy view rendering.
//!
//! TRUST BOUNDARY: the model's reply is rendered from markdown to HTML without
//! sanitization. Raw HTML inside the reply reaches the page as-is. The user's
//! own input is echoed as plain text and escaped by the front-end.

use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;
use uuid::Uuid;

use crate::presentation::cards::{IdeaCard, IDEA_CARDS};
use crate::strategy::pipeline::{InputSource, SubmissionOutcome};

#[derive(Debug, Serialize)]
pub struct StrategyView {
    pub session_id: Uuid,
    pub input_source: InputSource,
    pub input_echo: String,
    pub reply_markdown: String,
    pub reply_html: String,
    pub message_count: usize,
    /// `None` when idea cards are switched off.
    pub cards: Option<&'static [IdeaCard]>,
}

/// Renders markdown to HTML. Inline and block HTML pass through unescaped.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

pub fn build_view(
    session_id: Uuid,
    input_source: InputSource,
    outcome: SubmissionOutcome,
    show_cards: bool,
) -> StrategyView {
    StrategyView {
        session_id,
        input_source,
        reply_html: render_markdown(&outcome.reply),
        input_echo: outcome.input_echo,
        reply_markdown: outcome.reply,
        message_count: outcome.message_count,
        cards: show_cards.then_some(IDEA_CARDS),
    }
}
