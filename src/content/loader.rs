//! Content loader - resolves the manifest into post records

use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

use super::fetch::{FetchError, Fetcher};
use super::manifest::{Manifest, ManifestEntry};
use super::PostRecord;

/// Failure taxonomy of a load
#[derive(Error, Debug)]
pub enum LoadError {
    /// The manifest could not be fetched or parsed. Terminal for the load.
    #[error("manifest unavailable: {0}")]
    ManifestUnavailable(String),
    /// One post's content could not be fetched. The post is dropped.
    #[error("content for post {id} ({title}) unavailable: {source}")]
    PostContentUnavailable {
        id: i64,
        title: String,
        #[source]
        source: FetchError,
    },
}

/// Loads posts through a [`Fetcher`]
pub struct ContentLoader<F> {
    fetcher: Arc<F>,
}

impl<F: Fetcher> ContentLoader<F> {
    /// Create a new content loader
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    /// Load every post listed in the manifest at `manifest_path`
    ///
    /// Content files are fetched concurrently and the call returns once all of
    /// them have settled. Posts whose content is unavailable are left out.
    /// The result is sorted by ascending id; equal ids keep manifest order.
    pub async fn load_all(&self, manifest_path: &str) -> Result<Vec<PostRecord>, LoadError> {
        let source = self
            .fetcher
            .fetch_text(manifest_path)
            .await
            .map_err(|e| LoadError::ManifestUnavailable(e.to_string()))?;

        let manifest = Manifest::parse(&source)
            .map_err(|e| LoadError::ManifestUnavailable(format!("{}: {}", manifest_path, e)))?;

        tracing::debug!(
            "Manifest {} lists {} entries ({} skipped)",
            manifest_path,
            manifest.entries.len(),
            manifest.skipped
        );

        let mut tasks = JoinSet::new();
        for (position, entry) in manifest.entries.into_iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            tasks.spawn(async move {
                let result = fetcher.fetch_text(&entry.content_file).await;
                (position, resolve_entry(entry, result))
            });
        }

        let mut resolved = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((position, Ok(post))) => resolved.push((position, post)),
                Ok((_, Err(e))) => tracing::warn!("Skipping post: {}", e),
                Err(e) => tracing::warn!("Post fetch task failed: {}", e),
            }
        }

        // Completion order is arbitrary; restore manifest order before the
        // stable id sort so duplicate ids keep their relative order.
        resolved.sort_by_key(|(position, _)| *position);
        let mut posts: Vec<PostRecord> = resolved.into_iter().map(|(_, post)| post).collect();
        posts.sort_by_key(|post| post.id);

        tracing::info!("Loaded {} posts", posts.len());
        Ok(posts)
    }
}

/// Turn a manifest entry plus its fetched content into a record
fn resolve_entry(
    entry: ManifestEntry,
    content: Result<String, FetchError>,
) -> Result<PostRecord, LoadError> {
    match content {
        Ok(content) => Ok(PostRecord {
            id: entry.id,
            title: entry.title,
            content,
            images: entry.images,
        }),
        Err(source) => Err(LoadError::PostContentUnavailable {
            id: entry.id,
            title: entry.title,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fetch::MemoryFetcher;

    fn ids(posts: &[PostRecord]) -> Vec<i64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_load_sorts_by_id() {
        let fetcher = MemoryFetcher::new()
            .with(
                "files.json",
                r#"[
                    {"id": 3, "title": "Three", "contentFile": "3.txt"},
                    {"id": 1, "title": "One", "contentFile": "1.txt", "images": ["a.jpg"]},
                    {"id": 2, "title": "Two", "contentFile": "2.txt"}
                ]"#,
            )
            .with("1.txt", "one")
            .with("2.txt", "two")
            .with("3.txt", "three");

        let posts = ContentLoader::new(fetcher).load_all("files.json").await.unwrap();
        assert_eq!(ids(&posts), vec![1, 2, 3]);
        assert_eq!(posts[0].content, "one");
        assert_eq!(posts[0].images, vec!["a.jpg"]);
        assert!(posts[1].images.is_empty());
    }

    #[tokio::test]
    async fn test_failed_content_is_dropped() {
        let fetcher = MemoryFetcher::new()
            .with(
                "files.json",
                r#"[
                    {"id": 5, "title": "Ok", "contentFile": "5.txt"},
                    {"id": 4, "title": "Missing", "contentFile": "missing.txt"},
                    {"id": 1, "title": "Ok too", "contentFile": "1.txt"},
                    {"id": 2, "title": "Missing too", "contentFile": "gone.txt"}
                ]"#,
            )
            .with("5.txt", "five")
            .with("1.txt", "one");

        let posts = ContentLoader::new(fetcher).load_all("files.json").await.unwrap();
        assert_eq!(ids(&posts), vec![1, 5]);
    }

    #[tokio::test]
    async fn test_malformed_entries_are_dropped() {
        let fetcher = MemoryFetcher::new()
            .with(
                "files.json",
                r#"[
                    {"id": 1, "title": "Ok", "contentFile": "1.txt"},
                    {"title": "No id", "contentFile": "1.txt"},
                    {"id": 2, "title": "No file"}
                ]"#,
            )
            .with("1.txt", "one");

        let posts = ContentLoader::new(fetcher).load_all("files.json").await.unwrap();
        assert_eq!(ids(&posts), vec![1]);
    }

    #[tokio::test]
    async fn test_null_images_keeps_post() {
        let fetcher = MemoryFetcher::new()
            .with(
                "files.json",
                r#"[{"id": 7, "title": "Bare", "contentFile": "7.txt", "images": null}]"#,
            )
            .with("7.txt", "seven");

        let posts = ContentLoader::new(fetcher).load_all("files.json").await.unwrap();
        assert_eq!(ids(&posts), vec![7]);
        assert!(posts[0].images.is_empty());
    }

    #[tokio::test]
    async fn test_equal_ids_keep_manifest_order() {
        let fetcher = MemoryFetcher::new()
            .with(
                "files.json",
                r#"[
                    {"id": 2, "title": "B", "contentFile": "b.txt"},
                    {"id": 1, "title": "A", "contentFile": "a.txt"},
                    {"id": 2, "title": "C", "contentFile": "c.txt"}
                ]"#,
            )
            .with("a.txt", "")
            .with("b.txt", "")
            .with("c.txt", "");

        let posts = ContentLoader::new(fetcher).load_all("files.json").await.unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_missing_manifest_is_terminal() {
        let loader = ContentLoader::new(MemoryFetcher::new());
        assert!(matches!(
            loader.load_all("files.json").await,
            Err(LoadError::ManifestUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_unparseable_manifest_is_terminal() {
        let fetcher = MemoryFetcher::new().with("files.json", r#"{"posts": []}"#);
        assert!(matches!(
            ContentLoader::new(fetcher).load_all("files.json").await,
            Err(LoadError::ManifestUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("files.json"),
            r#"[{"id": 1, "title": "Disk", "contentFile": "posts/1.txt"}]"#,
        )
        .unwrap();
        std::fs::create_dir_all(dir.path().join("posts")).unwrap();
        std::fs::write(dir.path().join("posts/1.txt"), "line one\nline two").unwrap();

        let loader = ContentLoader::new(crate::content::FsFetcher::new(dir.path()));
        let posts = loader.load_all("files.json").await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "line one\nline two");
    }
}
