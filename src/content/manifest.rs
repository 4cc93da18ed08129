//! Manifest parsing
//!
//! The manifest is a JSON array of entries:
//!
//! ```json
//! [{ "id": 1, "title": "Hello", "contentFile": "posts/1.txt", "images": ["img/a.jpg"] }]
//! ```
//!
//! A document that is not a JSON array is unusable as a whole. Individual
//! entries that fail to decode are skipped so one bad record cannot take the
//! rest of the blog down with it.

use serde::{Deserialize, Deserializer, Serialize};

/// One manifest entry, before its content is fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub id: i64,
    pub title: String,
    /// Path of the post's text body, relative to the manifest's root
    pub content_file: String,
    /// Missing and `null` both mean no images
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A decoded manifest
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Valid entries, in manifest order
    pub entries: Vec<ManifestEntry>,
    /// Number of elements that were skipped as malformed
    pub skipped: usize,
}

impl Manifest {
    /// Parse a manifest document
    ///
    /// Fails only when the document is not JSON or not an array.
    pub fn parse(source: &str) -> serde_json::Result<Self> {
        let raw: Vec<serde_json::Value> = serde_json::from_str(source)?;

        let mut manifest = Manifest::default();
        for (position, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<ManifestEntry>(value) {
                Ok(entry) => manifest.entries.push(entry),
                Err(e) => {
                    tracing::warn!("Skipping malformed manifest entry #{}: {}", position, e);
                    manifest.skipped += 1;
                }
            }
        }

        Ok(manifest)
    }
}
