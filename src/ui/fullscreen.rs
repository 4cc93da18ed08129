//! Fullscreen image viewer, shared by every card

/// The overlay's state; `None` inside means closed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullscreenViewer {
    state: Option<FullscreenState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FullscreenState {
    images: Vec<String>,
    current: usize,
}

/// What the overlay shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullscreenFrame {
    pub index: usize,
    pub url: String,
    /// Prev/next controls are hidden for a single image
    pub controls: bool,
}

impl FullscreenViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.current)
    }

    /// Show `images[start]`; an out-of-range start wraps, an empty list is ignored
    pub fn open(&mut self, images: Vec<String>, start: usize) -> Option<FullscreenFrame> {
        if images.is_empty() {
            return None;
        }
        let current = start % images.len();
        self.state = Some(FullscreenState { images, current });
        self.frame()
    }

    pub fn next(&mut self) -> Option<FullscreenFrame> {
        let state = self.state.as_mut()?;
        state.current = (state.current + 1) % state.images.len();
        self.frame()
    }

    pub fn prev(&mut self) -> Option<FullscreenFrame> {
        let state = self.state.as_mut()?;
        let len = state.images.len();
        state.current = (state.current + len - 1) % len;
        self.frame()
    }

    /// Hide the overlay and forget the image sequence
    ///
    /// Returns whether the viewer was open.
    pub fn close(&mut self) -> bool {
        self.state.take().is_some()
    }

    pub fn frame(&self) -> Option<FullscreenFrame> {
        let state = self.state.as_ref()?;
        Some(FullscreenFrame {
            index: state.current,
            url: state.images[state.current].clone(),
            controls: state.images.len() > 1,
        })
    }
}
