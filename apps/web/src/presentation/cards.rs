use serde::Serialize;

/// A static promotional idea shown under each strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdeaCard {
    pub title: &'static str,
    pub description: &'static str,
    /// Path of an embedded front-end asset.
    pub image_ref: &'static str,
    pub link: &'static str,
}

pub const IDEA_CARDS: &[IdeaCard] = &[
    IdeaCard {
        title: "Publish an AI-assisted guide",
        description: "Turn decades of know-how into a short how-to book. Draft with ChatGPT, edit in your own voice, and sell it on Kindle Direct Publishing.",
        image_ref: "/static/cards/guide.svg",
        link: "https://kdp.amazon.com",
    },
    IdeaCard {
        title: "Sell templates and checklists",
        description: "Package the spreadsheets, checklists and forms you already use at work as digital downloads.",
        image_ref: "/static/cards/templates.svg",
        link: "https://gumroad.com",
    },
    IdeaCard {
        title: "Launch a mini-course",
        description: "Record a handful of short lessons on the skill people always ask you about. AI tools handle scripts, slides and captions.",
        image_ref: "/static/cards/course.svg",
        link: "https://teachable.com",
    },
    IdeaCard {
        title: "Design print-on-demand products",
        description: "Generate artwork for posters, mugs and shirts around your industry's in-jokes. The platform prints and ships each order.",
        image_ref: "/static/cards/print.svg",
        link: "https://www.canva.com",
    },
];
