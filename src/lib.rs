//! postdeck: a static blog front end
//!
//! Posts are listed in a JSON manifest and their bodies live in plain text
//! files. postdeck loads them, renders one card per post (with an image
//! carousel when the post has images), and writes a single page with search,
//! an index panel, a shared fullscreen viewer, scroll controls and a
//! persisted light/dark theme.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod server;
pub mod store;
pub mod ui;

use anyhow::Result;
use std::path::Path;

use content::{ContentLoader, FsFetcher, LoadError, PostRecord};

/// A postdeck site on disk
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source directory (manifest, post bodies, images)
    pub source_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new Site instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
        })
    }

    /// Load every post listed in the manifest
    pub async fn load_posts(&self) -> Result<Vec<PostRecord>, LoadError> {
        let loader = ContentLoader::new(FsFetcher::new(&self.source_dir));
        loader.load_all(&self.config.manifest).await
    }

    /// Generate the static site
    pub async fn build(&self) -> Result<()> {
        commands::build::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
