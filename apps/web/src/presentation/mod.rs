// Presentation: turns a finished submission into the view the front-end shows.
// Card rendering is a toggle on the same view, not a separate code path.

pub mod cards;
pub mod handlers;
pub mod render;
