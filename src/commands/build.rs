//! Build the static site

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::generator::Generator;
use crate::Site;

/// Quiet period before a batch of changes triggers a rebuild
const SETTLE: Duration = Duration::from_millis(500);

/// Load posts and write the site
pub async fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let loaded = site.load_posts().await;
    match &loaded {
        Ok(posts) => tracing::info!("Loaded {} posts", posts.len()),
        Err(e) => tracing::error!("{}; generating the error page", e),
    }

    Generator::new(site).generate(loaded)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch the source directory and config, rebuilding on change
pub async fn watch(site: &Site) -> Result<()> {
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    watch_with(site, |_| {}).await
}

/// Rebuild after every settled batch of changes
///
/// `on_rebuild` receives the number of successful rebuilds so far. The site
/// is reloaded each time so `_config.yml` edits take effect.
pub async fn watch_with<F>(site: &Site, mut on_rebuild: F) -> Result<()>
where
    F: FnMut(u64) + Send,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(SETTLE, move |batch| {
        let _ = tx.send(batch);
    })?;

    if site.source_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.source_dir, RecursiveMode::Recursive)?;
    }
    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    let mut generation = 0;
    while let Some(batch) = rx.recv().await {
        let events = match batch {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<&Path> = events
            .iter()
            .map(|event| event.path.as_path())
            .filter(|path| !is_noise(path))
            .collect();
        if changed.is_empty() {
            continue;
        }
        for path in &changed {
            tracing::info!("Changed: {}", path.display());
        }

        let rebuilt = match Site::new(&site.base_dir) {
            Ok(current) => run(&current).await,
            Err(e) => Err(e),
        };
        match rebuilt {
            Ok(()) => {
                generation += 1;
                on_rebuild(generation);
            }
            Err(e) => tracing::error!("Generation failed: {}", e),
        }
    }

    Ok(())
}

/// Editor backups and VCS churn never trigger a rebuild
fn is_noise(path: &Path) -> bool {
    if path.components().any(|c| c.as_os_str() == ".git") {
        return true;
    }
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name == ".DS_Store" || name.ends_with('~') || name.ends_with(".swp"),
        None => false,
    }
}
