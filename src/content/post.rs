//! Post records

use serde::{Deserialize, Serialize};

/// A fully resolved post: manifest metadata plus its fetched text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Unique id, used for ordering and as the card anchor
    pub id: i64,

    /// Post title
    pub title: String,

    /// Plain text body, newline-separated paragraphs
    pub content: String,

    /// Carousel image URLs, in display order
    pub images: Vec<String>,
}

impl PostRecord {
    /// Create a new post record
    pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            images: Vec::new(),
        }
    }

    /// Attach carousel images
    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// Anchor id of this post's card (`post-{id}`)
    pub fn anchor(&self) -> String {
        anchor_for(self.id)
    }
}

/// Anchor id for a post id
pub fn anchor_for(id: i64) -> String {
    format!("post-{}", id)
}
