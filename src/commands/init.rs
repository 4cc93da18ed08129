//! Initialize a new postdeck site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("source/posts"))?;
    fs::create_dir_all(target_dir.join("source/images"))?;

    // Create default _config.yml
    let config_content = r#"# postdeck configuration

# Site
title: Postdeck
subtitle: ''
author: John Doe
language: en

# Directory
source_dir: source
public_dir: public
manifest: files.json

# Cards
words_per_minute: 200
empty_message: No posts yet.
no_results_message: No posts match your search.
error_message: Could not load posts. Ensure files.json exists.

# Scroll controls
scroll:
  top_threshold: 300
  bottom_epsilon: 50
  autohide_ms: 2000

# Carousel
carousel:
  swipe_threshold: 50

# Theme
theme:
  default_dark: false
"#;

    fs::write(target_dir.join("_config.yml"), config_content)?;

    let manifest = r#"[
  {
    "id": 1,
    "title": "Hello World",
    "contentFile": "posts/hello-world.txt",
    "images": []
  }
]
"#;
    fs::write(target_dir.join("source/files.json"), manifest)?;

    // Create a sample post
    let sample_post = "Welcome to postdeck! This is your very first post.\n\
List new posts in source/files.json and put their text in source/posts.\n\
Images listed under \"images\" show up in a carousel above the text.\n\
\n\
Run `postdeck build` to generate the site, or `postdeck serve` to preview it.\n";
    fs::write(target_dir.join("source/posts/hello-world.txt"), sample_post)?;

    Ok(())
}
