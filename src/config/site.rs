//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub language: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    /// Manifest path, relative to the source directory
    pub manifest: String,

    // Cards
    pub words_per_minute: usize,
    /// Placeholder shown when a load produced no posts
    pub empty_message: String,
    /// Placeholder shown when a search matches nothing
    pub no_results_message: String,
    /// Error card shown when the manifest cannot be loaded
    pub error_message: String,

    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Postdeck".to_string(),
            subtitle: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            manifest: "files.json".to_string(),

            words_per_minute: 200,
            empty_message: "No posts yet.".to_string(),
            no_results_message: "No posts match your search.".to_string(),
            error_message: "Could not load posts. Ensure files.json exists.".to_string(),

            scroll: ScrollConfig::default(),
            carousel: CarouselConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Scroll control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Offset (px) past which the "scroll to top" control shows
    pub top_threshold: f64,
    /// Distance (px) from the bottom within which "scroll to bottom" hides
    pub bottom_epsilon: f64,
    /// Idle time after the last scroll event before both controls hide
    pub autohide_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            top_threshold: 300.0,
            bottom_epsilon: 50.0,
            autohide_ms: 2000,
        }
    }
}

/// Carousel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Minimum horizontal displacement (px) that counts as a swipe
    pub swipe_threshold: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
        }
    }
}

/// Theme configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// System preference assumed when no host can report one (CLI side)
    pub default_dark: bool,
}
