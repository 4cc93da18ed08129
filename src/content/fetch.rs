//! Text fetching
//!
//! The loader never touches the file system or the network directly; it asks
//! a [`Fetcher`] for the text behind a path. [`FsFetcher`] serves paths from a
//! site's source directory, which is what a static host does for `GET <path>`.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Failure to fetch a single resource
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("path escapes the site root: {0}")]
    OutsideRoot(String),
    #[error("IO error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Source of text resources addressed by relative path
pub trait Fetcher: Send + Sync + 'static {
    /// Fetch the resource at `path` as UTF-8 text
    fn fetch_text(&self, path: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Fetches files below a root directory
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Create a fetcher rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a request path against the root, rejecting `..` escapes
    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();

        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return Err(FetchError::OutsideRoot(path.to_string())),
            }
        }

        Ok(resolved)
    }
}

impl Fetcher for FsFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let file = self.resolve(path)?;
        tracing::debug!("Fetching {:?}", file);

        match tokio::fs::read_to_string(&file).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(path.to_string()))
            }
            Err(e) => Err(FetchError::Io {
                path: path.to_string(),
                source: e,
            }),
        }
    }
}

/// In-memory fetcher, handy for previews and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    files: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource
    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl Fetcher for MemoryFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}
