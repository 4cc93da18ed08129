//! Show or toggle the persisted theme preference

use anyhow::Result;

use crate::store::FileStore;
use crate::ui::{Theme, ThemeController};
use crate::Site;

/// Resolve the theme, toggling (and persisting) it when asked
pub fn run(site: &Site, toggle: bool, system_dark: Option<bool>) -> Result<Theme> {
    let store = FileStore::open(&site.base_dir);
    let system_dark = system_dark.unwrap_or(site.config.theme.default_dark);
    let mut theme = ThemeController::init(store, system_dark);

    if toggle {
        let next = theme.toggle()?;
        tracing::info!("Saved theme preference {:?}", theme.store().path());
        println!("Theme: {} (saved)", next);
    } else {
        let source = if theme.stored().is_some() {
            "saved preference"
        } else {
            "system preference"
        };
        println!("Theme: {} ({})", theme.current(), source);
    }

    Ok(theme.current())
}
