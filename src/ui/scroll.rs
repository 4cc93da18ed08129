//! Scroll-to-top / scroll-to-bottom controls with idle autohide

use std::time::{Duration, Instant};

use crate::config::ScrollConfig;

/// Viewport measurements taken on a scroll event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

/// Which controls are visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollButtons {
    pub top: bool,
    pub bottom: bool,
}

/// Tracks control visibility and the pending hide deadline
#[derive(Debug, Clone)]
pub struct ScrollControls {
    top_threshold: f64,
    bottom_epsilon: f64,
    autohide: Duration,
    buttons: ScrollButtons,
    hide_at: Option<Instant>,
}

impl ScrollControls {
    pub fn new(config: &ScrollConfig) -> Self {
        Self {
            top_threshold: config.top_threshold,
            bottom_epsilon: config.bottom_epsilon,
            autohide: Duration::from_millis(config.autohide_ms),
            buttons: ScrollButtons::default(),
            hide_at: None,
        }
    }

    pub fn buttons(&self) -> ScrollButtons {
        self.buttons
    }

    /// Deadline of the pending autohide, if any
    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Recompute visibility and restart the idle timer
    pub fn on_scroll(&mut self, metrics: ScrollMetrics, now: Instant) -> ScrollButtons {
        let at_bottom = metrics.viewport_height + metrics.scroll_y
            >= metrics.document_height - self.bottom_epsilon;

        self.buttons = ScrollButtons {
            top: metrics.scroll_y > self.top_threshold,
            bottom: !at_bottom,
        };
        self.hide_at = Some(now + self.autohide);
        self.buttons
    }

    /// Fire the autohide if its deadline has passed
    ///
    /// Returns the new visibility when something changed.
    pub fn tick(&mut self, now: Instant) -> Option<ScrollButtons> {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.hide_at = None;
                self.buttons = ScrollButtons::default();
                Some(self.buttons)
            }
            _ => None,
        }
    }
}
