//! Generator module - writes the single-page site
//!
//! The initial post list and index come from the same [`Page`] controller
//! the page script mirrors, so the first paint matches what a load followed
//! by a full render produces.
//!
//! Output:
//!
//! ```text
//! public/
//! ├── index.html       # layout, prerendered cards and index, post data
//! ├── css/style.css
//! ├── js/postdeck.js
//! └── images/...      # source assets; the manifest and post bodies stay behind
//! ```

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::{LoadError, Manifest, PostRecord};
use crate::helpers::{html_escape, meta_generator};
use crate::render::{index_html, ListView};
use crate::store::MemoryStore;
use crate::ui::{Effect, IndexEntry, Page};
use crate::Site;

const STYLE_CSS: &str = include_str!("static/style.css");
const PAGE_JS: &str = include_str!("static/postdeck.js");

/// Static site generator
pub struct Generator {
    site: Site,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Self {
        Self { site: site.clone() }
    }

    /// Generate the site from a load result
    ///
    /// A failed load still produces a page, showing the error card.
    pub fn generate(&self, loaded: Result<Vec<PostRecord>, LoadError>) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_source_assets()?;
        self.write_static_assets()?;

        let html = self.render_index_page(loaded)?;
        let output_path = self.site.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Render `index.html`
    pub fn render_index_page(&self, loaded: Result<Vec<PostRecord>, LoadError>) -> Result<String> {
        let config = &self.site.config;
        let is_loaded = loaded.is_ok();

        let (mut page, _) = Page::new(config, MemoryStore::new(), config.theme.default_dark);
        let mut list = ListView::Error(config.error_message.clone());
        let mut index: Vec<IndexEntry> = Vec::new();
        for effect in page.load(loaded) {
            match effect {
                Effect::RenderList(view) => list = view,
                Effect::RenderIndex(entries) => index = entries,
                _ => {}
            }
        }

        let posts_json = serde_json::to_string(page.posts())?.replace("</", "<\\/");

        Ok(layout(&LayoutData {
            config,
            list_html: list.to_html(),
            index_html: index_html(&index),
            posts_json,
            loaded: is_loaded,
        }))
    }

    fn write_static_assets(&self) -> Result<()> {
        let css_dir = self.site.public_dir.join("css");
        let js_dir = self.site.public_dir.join("js");
        fs::create_dir_all(&css_dir)?;
        fs::create_dir_all(&js_dir)?;
        fs::write(css_dir.join("style.css"), STYLE_CSS)?;
        fs::write(js_dir.join("postdeck.js"), PAGE_JS)?;
        Ok(())
    }

    /// Files already baked into `index.html`: the manifest and every post body
    /// it names
    fn baked_sources(&self) -> HashSet<PathBuf> {
        let source_dir = &self.site.source_dir;
        let manifest_path = source_dir.join(&self.site.config.manifest);

        let mut baked = HashSet::new();
        if let Some(manifest) = fs::read_to_string(&manifest_path)
            .ok()
            .and_then(|text| Manifest::parse(&text).ok())
        {
            baked.extend(
                manifest
                    .entries
                    .iter()
                    .map(|entry| source_dir.join(&entry.content_file)),
            );
        }
        baked.insert(manifest_path);
        baked
    }

    /// Copy source assets (images and anything else not baked in) into public
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }
        let baked = self.baked_sources();

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || baked.contains(path) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = self.site.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest)?;
        }

        Ok(())
    }
}

struct LayoutData<'a> {
    config: &'a SiteConfig,
    list_html: String,
    index_html: String,
    posts_json: String,
    loaded: bool,
}

fn layout(data: &LayoutData<'_>) -> String {
    let config = data.config;
    let subtitle = if config.subtitle.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="subtitle">{}</p>"#, html_escape(&config.subtitle))
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="{language}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="author" content="{author}">
{generator}
<title>{title}</title>
<link rel="stylesheet" href="css/style.css">
</head>
<body data-loaded="{loaded}" data-words-per-minute="{wpm}" data-swipe-threshold="{swipe}" data-top-threshold="{top}" data-bottom-epsilon="{bottom}" data-autohide-ms="{autohide}" data-empty="{empty}" data-no-results="{no_results}">
<header>
<h1>{title}</h1>
{subtitle}
<input type="search" id="search-input" placeholder="Search posts">
<button id="theme-toggle" aria-label="Toggle theme">&#9680;</button>
</header>
<div class="layout">
<nav><ul id="post-index-list">
{index}
</ul></nav>
<main id="post-list">
{list}
</main>
</div>
<button id="scroll-to-top" class="scroll-button invisible" aria-label="Scroll to top">&#8593;</button>
<button id="scroll-to-bottom" class="scroll-button invisible" aria-label="Scroll to bottom">&#8595;</button>
<div id="fullscreen-overlay" class="hidden-overlay">
<button id="fullscreen-close" class="fullscreen-button" aria-label="Close">&times;</button>
<button id="fullscreen-prev" class="fullscreen-button" aria-label="Previous">&lt;</button>
<img id="fullscreen-image" src="" alt="Fullscreen">
<button id="fullscreen-next" class="fullscreen-button" aria-label="Next">&gt;</button>
</div>
<script type="application/json" id="posts-data">{posts}</script>
<script src="js/postdeck.js"></script>
</body>
</html>
"##,
        language = html_escape(&config.language),
        author = html_escape(&config.author),
        generator = meta_generator(),
        title = html_escape(&config.title),
        subtitle = subtitle,
        loaded = data.loaded,
        wpm = config.words_per_minute,
        swipe = config.carousel.swipe_threshold,
        top = config.scroll.top_threshold,
        bottom = config.scroll.bottom_epsilon,
        autohide = config.scroll.autohide_ms,
        empty = html_escape(&config.empty_message),
        no_results = html_escape(&config.no_results_message),
        index = data.index_html,
        list = data.list_html,
        posts = data.posts_json,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    const REQUIRED_IDS: [&str; 12] = [
        "post-list",
        "search-input",
        "post-index-list",
        "scroll-to-top",
        "scroll-to-bottom",
        "fullscreen-overlay",
        "fullscreen-image",
        "fullscreen-prev",
        "fullscreen-next",
        "fullscreen-close",
        "theme-toggle",
        "posts-data",
    ];

    #[test]
    fn test_page_has_every_region() {
        let (_dir, site) = site();
        let html = Generator::new(&site).render_index_page(Ok(Vec::new())).unwrap();
        for id in REQUIRED_IDS {
            assert!(html.contains(&format!(r#"id="{}""#, id)), "missing #{}", id);
        }
        assert!(html.contains("No posts yet."));
    }

    #[test]
    fn test_page_lists_posts_in_id_order() {
        let (_dir, site) = site();
        let posts = vec![
            PostRecord::new(1, "First", "a"),
            PostRecord::new(2, "Second", "b").with_images(["x.jpg", "y.jpg"]),
        ];
        let html = Generator::new(&site).render_index_page(Ok(posts)).unwrap();

        let first = html.find(r#"id="post-1""#).unwrap();
        let second = html.find(r#"id="post-2""#).unwrap();
        assert!(first < second);
        assert!(html.contains(r##"<a href="#post-2" data-anchor="post-2">Second</a>"##));
        assert!(html.contains("carousel-button next"));
        assert!(html.contains(r#"data-loaded="true""#));
    }

    #[test]
    fn test_failed_load_renders_error_card() {
        let (_dir, site) = site();
        let html = Generator::new(&site)
            .render_index_page(Err(LoadError::ManifestUnavailable("missing".into())))
            .unwrap();
        assert!(html.contains("Could not load posts. Ensure files.json exists."));
        assert!(html.contains(r#"data-loaded="false""#));
        assert!(html.contains(r#"<script type="application/json" id="posts-data">[]</script>"#));
    }

    #[test]
    fn test_post_data_cannot_close_script() {
        let (_dir, site) = site();
        let posts = vec![PostRecord::new(1, "x", "</script><b>")];
        let html = Generator::new(&site).render_index_page(Ok(posts)).unwrap();
        assert!(!html.contains("</script><b>"));
    }

    #[test]
    fn test_empty_site_has_one_message_card() {
        let (_dir, site) = site();
        let html = Generator::new(&site).render_index_page(Ok(Vec::new())).unwrap();
        assert_eq!(html.matches("post-card placeholder").count(), 1);
        // search reuses that card instead of adding a second one
        assert!(PAGE_JS.contains("postList.querySelector('.post-card.placeholder')"));
    }

    #[test]
    fn test_carousel_reset_cancels_pending_swap() {
        let reset = PAGE_JS.find("state.reset = function").unwrap();
        assert!(PAGE_JS[reset..].contains("cancelSwap();"));
        assert!(PAGE_JS.contains("if (swap !== null) clearTimeout(swap);"));
    }

    #[test]
    fn test_generate_skips_manifest_and_bodies() {
        let (dir, site) = site();
        fs::create_dir_all(site.source_dir.join("posts")).unwrap();
        fs::create_dir_all(site.source_dir.join("images")).unwrap();
        fs::write(
            site.source_dir.join("files.json"),
            r#"[{"id": 1, "title": "One", "contentFile": "posts/1.txt", "images": ["images/a.jpg"]}]"#,
        )
        .unwrap();
        fs::write(site.source_dir.join("posts/1.txt"), "body").unwrap();
        fs::write(site.source_dir.join("posts/notes.md"), "draft").unwrap();
        fs::write(site.source_dir.join("images/a.jpg"), b"jpeg").unwrap();

        Generator::new(&site).generate(Ok(Vec::new())).unwrap();

        let public = dir.path().join("public");
        assert!(public.join("images/a.jpg").exists());
        assert!(public.join("posts/notes.md").exists());
        assert!(!public.join("files.json").exists());
        assert!(!public.join("posts/1.txt").exists());
    }

    #[test]
    fn test_generate_writes_files() {
        let (dir, site) = site();
        fs::create_dir_all(site.source_dir.join("images")).unwrap();
        fs::write(site.source_dir.join("images/a.jpg"), b"jpeg").unwrap();

        Generator::new(&site).generate(Ok(Vec::new())).unwrap();

        let public = dir.path().join("public");
        assert!(public.join("index.html").exists());
        assert!(public.join("css/style.css").exists());
        assert!(public.join("js/postdeck.js").exists());
        assert!(public.join("images/a.jpg").exists());
    }
}
