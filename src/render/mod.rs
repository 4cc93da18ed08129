//! Card rendering
//!
//! Rendering is split in two steps: [`Renderer::render_list`] turns post
//! records into a [`ListView`] (pure data, no markup), and
//! [`ListView::to_html`] produces the markup that replaces the whole post
//! list region. Every render starts from scratch, so calling it on each
//! search keystroke is safe.

mod html;
mod reading_time;

pub use html::{index_html, render_list_html};
pub use reading_time::{reading_minutes, reading_time_label, word_count, WORDS_PER_MINUTE};

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::PostRecord;

/// Carousel part of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarouselView {
    pub post_id: i64,
    pub images: Vec<String>,
    /// Image shown initially, in both the foreground and the blurred backdrop
    pub current: String,
    /// Prev/next buttons and swipe handling, only with two or more images
    pub controls: bool,
}

impl CarouselView {
    /// Build the carousel for a post; `None` when it has no images
    pub fn for_post(post: &PostRecord) -> Option<Self> {
        let first = post.images.first()?;
        Some(Self {
            post_id: post.id,
            images: post.images.clone(),
            current: first.clone(),
            controls: post.images.len() > 1,
        })
    }
}

/// One post card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: i64,
    pub anchor: String,
    pub title: String,
    pub reading_time: String,
    /// Raw body text; newlines become line breaks in markup
    pub body: String,
    pub carousel: Option<CarouselView>,
}

/// The whole post list region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ListView {
    Cards(Vec<CardView>),
    /// Nothing to show; carries the message for the single placeholder card
    Placeholder(String),
    /// The load failed; carries the message for the single error card
    Error(String),
}

impl ListView {
    /// Cards in this view, empty for placeholder and error states
    pub fn cards(&self) -> &[CardView] {
        match self {
            ListView::Cards(cards) => cards,
            ListView::Placeholder(_) | ListView::Error(_) => &[],
        }
    }

    /// Render the view to markup
    pub fn to_html(&self) -> String {
        render_list_html(self)
    }
}

/// Builds card view models
#[derive(Debug, Clone)]
pub struct Renderer {
    words_per_minute: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(WORDS_PER_MINUTE)
    }
}

impl Renderer {
    pub fn new(words_per_minute: usize) -> Self {
        Self { words_per_minute }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.words_per_minute)
    }

    /// Build a single card
    pub fn card(&self, post: &PostRecord) -> CardView {
        CardView {
            id: post.id,
            anchor: post.anchor(),
            title: post.title.clone(),
            reading_time: reading_time_label(&post.content, self.words_per_minute),
            body: post.content.clone(),
            carousel: CarouselView::for_post(post),
        }
    }

    /// Build the list view for `posts`, in the given order
    ///
    /// An empty input yields a placeholder carrying `empty_message`.
    pub fn render_list<'a, I>(&self, posts: I, empty_message: &str) -> ListView
    where
        I: IntoIterator<Item = &'a PostRecord>,
    {
        let cards: Vec<CardView> = posts.into_iter().map(|post| self.card(post)).collect();
        if cards.is_empty() {
            return ListView::Placeholder(empty_message.to_string());
        }
        ListView::Cards(cards)
    }
}
