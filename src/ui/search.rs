//! Navigation index and search filtering

use serde::Serialize;

use crate::content::PostRecord;

/// One entry of the navigation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub post_id: i64,
    pub title: String,
    pub anchor: String,
}

/// Build the navigation list for the full post set
pub fn build_index(posts: &[PostRecord]) -> Vec<IndexEntry> {
    posts
        .iter()
        .map(|post| IndexEntry {
            post_id: post.id,
            title: post.title.clone(),
            anchor: post.anchor(),
        })
        .collect()
}

/// Whether `post` matches an already lowercased query
fn matches(post: &PostRecord, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle) || post.content.to_lowercase().contains(needle)
}

/// Posts whose title or content contains `query`, ignoring case
///
/// Order is preserved; an empty query keeps every post.
pub fn filter_posts<'a>(posts: &'a [PostRecord], query: &str) -> Vec<&'a PostRecord> {
    let needle = query.to_lowercase();
    posts.iter().filter(|post| matches(post, &needle)).collect()
}
