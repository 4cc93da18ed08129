//! Content module - manifest, fetching and post loading

pub mod fetch;
pub mod loader;
mod manifest;
mod post;

pub use fetch::{FetchError, Fetcher, FsFetcher, MemoryFetcher};
pub use loader::{ContentLoader, LoadError};
pub use manifest::{Manifest, ManifestEntry};
pub use post::{anchor_for, PostRecord};
