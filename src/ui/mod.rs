//! Interactive page state: carousels, fullscreen viewer, search, theme and
//! scroll controls, driven through explicit commands

pub mod carousel;
pub mod fullscreen;
pub mod input;
mod page;
pub mod scroll;
mod search;
pub mod theme;

pub use carousel::{CarouselState, Swipe, SwipeTracker};
pub use fullscreen::{FullscreenFrame, FullscreenViewer};
pub use input::{Command, InputEvent, Key, Target};
pub use page::{Effect, Page, ScrollTarget};
pub use scroll::{ScrollButtons, ScrollControls, ScrollMetrics};
pub use search::{build_index, filter_posts, IndexEntry};
pub use theme::{resolve as resolve_theme, Theme, ThemeController, THEME_KEY};
