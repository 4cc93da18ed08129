//! Raw input events and the commands they map to

use super::scroll::ScrollMetrics;

/// Innermost element an event landed on
///
/// Each click has exactly one target, which is how a prev/next click can
/// never also count as a click on the carousel image underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    CarouselPrev(i64),
    CarouselNext(i64),
    CarouselImage(i64),
    /// Carousel area outside the image and buttons
    Carousel(i64),
    Card(i64),
    IndexLink(i64),
    FullscreenBackdrop,
    FullscreenImage,
    FullscreenPrev,
    FullscreenNext,
    FullscreenClose,
    ThemeToggle,
    ScrollTop,
    ScrollBottom,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` name
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Input as the host delivers it
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Click(Target),
    TouchStart { post_id: i64, x: f64 },
    TouchEnd { post_id: i64, x: f64 },
    KeyDown(Key),
    /// New value of the search box
    SearchInput(String),
    Scroll(ScrollMetrics),
}

/// State transitions, independent of the input that caused them
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CarouselNext(i64),
    CarouselPrev(i64),
    OpenFullscreen(i64),
    FullscreenNext,
    FullscreenPrev,
    CloseFullscreen,
    Search(String),
    ScrollIntoView(i64),
    ToggleTheme,
    Scrolled(ScrollMetrics),
    /// Let pending timers fire
    Tick,
    ScrollToTop,
    ScrollToBottom,
}

/// Map a click to its command, if the target has one
pub fn click_command(target: Target) -> Option<Command> {
    let command = match target {
        Target::CarouselPrev(id) => Command::CarouselPrev(id),
        Target::CarouselNext(id) => Command::CarouselNext(id),
        Target::CarouselImage(id) => Command::OpenFullscreen(id),
        Target::IndexLink(id) => Command::ScrollIntoView(id),
        Target::FullscreenBackdrop | Target::FullscreenClose => Command::CloseFullscreen,
        Target::FullscreenPrev => Command::FullscreenPrev,
        Target::FullscreenNext => Command::FullscreenNext,
        Target::ThemeToggle => Command::ToggleTheme,
        Target::ScrollTop => Command::ScrollToTop,
        Target::ScrollBottom => Command::ScrollToBottom,
        Target::Carousel(_) | Target::Card(_) | Target::FullscreenImage | Target::Other => {
            return None
        }
    };
    Some(command)
}

/// Map a key press to its command; keys only act while the viewer is open
pub fn key_command(key: &Key, fullscreen_open: bool) -> Option<Command> {
    if !fullscreen_open {
        return None;
    }
    match key {
        Key::Escape => Some(Command::CloseFullscreen),
        Key::ArrowRight => Some(Command::FullscreenNext),
        Key::ArrowLeft => Some(Command::FullscreenPrev),
        Key::Other(_) => None,
    }
}
