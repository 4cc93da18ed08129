//! Light/dark theme preference

use std::fmt;
use std::str::FromStr;

use crate::store::{KeyValueStore, StoreError};

/// Storage key of the explicit preference
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value of the `data-theme` attribute; light is the attribute's absence
    pub fn data_attribute(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Stored choice wins; otherwise follow the system
pub fn resolve(stored: Option<Theme>, system_prefers_dark: bool) -> Theme {
    match stored {
        Some(theme) => theme,
        None if system_prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

/// Resolved theme plus the store its explicit choice lives in
pub struct ThemeController<S> {
    store: S,
    current: Theme,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Read the stored preference once and resolve the starting theme
    ///
    /// An unrecognised stored value counts as no preference.
    pub fn init(store: S, system_prefers_dark: bool) -> Self {
        let stored = store
            .get(THEME_KEY)
            .and_then(|value| value.parse::<Theme>().ok());
        Self {
            current: resolve(stored, system_prefers_dark),
            store,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Explicit choice, if one was ever stored
    pub fn stored(&self) -> Option<Theme> {
        self.store
            .get(THEME_KEY)
            .and_then(|value| value.parse().ok())
    }

    /// Flip the theme and persist the choice
    ///
    /// The flip holds for this session even when the choice cannot be saved.
    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        self.current = self.current.flipped();
        self.store.set(THEME_KEY, self.current.as_str())?;
        Ok(self.current)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
