//! Per-card image carousel

/// Cyclic position over a non-empty image sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    images: Vec<String>,
    current: usize,
}

/// What the host should display after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    /// Shown in both the foreground and the blurred background
    pub url: String,
    /// Next image to warm the cache with
    pub preload: String,
}

impl CarouselState {
    /// Create a carousel at index 0; `None` for an empty image list
    pub fn new(images: Vec<String>) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        Some(Self { images, current: 0 })
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Navigation controls and swipes only make sense with two or more images
    pub fn has_controls(&self) -> bool {
        self.images.len() > 1
    }

    /// Advance to `(i + 1) mod N`
    pub fn next(&mut self) -> Frame {
        self.current = (self.current + 1) % self.images.len();
        self.frame()
    }

    /// Step back to `(i - 1 + N) mod N`
    pub fn prev(&mut self) -> Frame {
        let len = self.images.len();
        self.current = (self.current + len - 1) % len;
        self.frame()
    }

    /// Jump to `index`, wrapped into range
    pub fn go_to(&mut self, index: usize) -> Frame {
        self.current = index % self.images.len();
        self.frame()
    }

    /// Current frame
    pub fn frame(&self) -> Frame {
        let len = self.images.len();
        Frame {
            index: self.current,
            url: self.images[self.current].clone(),
            preload: self.images[(self.current + 1) % len].clone(),
        }
    }
}

/// Direction of a recognised swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved left: show the next image
    Left,
    /// Finger moved right: show the previous image
    Right,
}

/// Recognises horizontal swipes from touch start/end positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish a gesture; only horizontal displacement beyond the threshold counts
    pub fn touch_end(&mut self, x: f64) -> Option<Swipe> {
        let start = self.start_x.take()?;
        if x < start - self.threshold {
            Some(Swipe::Left)
        } else if x > start + self.threshold {
            Some(Swipe::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> CarouselState {
        CarouselState::new((0..n).map(|i| format!("{}.jpg", i)).collect()).unwrap()
    }

    #[test]
    fn test_empty_has_no_carousel() {
        assert!(CarouselState::new(Vec::new()).is_none());
    }

    #[test]
    fn test_starts_at_zero() {
        let c = carousel(3);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.frame().url, "0.jpg");
        assert_eq!(c.frame().preload, "1.jpg");
    }

    #[test]
    fn test_next_wraps_from_last() {
        for n in 1..6 {
            let mut c = carousel(n);
            for _ in 0..n - 1 {
                c.next();
            }
            assert_eq!(c.current_index(), n - 1);
            assert_eq!(c.next().index, 0);
        }
    }

    #[test]
    fn test_prev_wraps_from_first() {
        for n in 1..6 {
            let mut c = carousel(n);
            let frame = c.prev();
            assert_eq!(frame.index, n - 1);
            assert_eq!(frame.url, format!("{}.jpg", n - 1));
        }
    }

    #[test]
    fn test_preload_is_following_image() {
        let mut c = carousel(3);
        c.next();
        let frame = c.next();
        assert_eq!(frame.url, "2.jpg");
        assert_eq!(frame.preload, "0.jpg");
    }

    #[test]
    fn test_go_to_wraps() {
        let mut c = carousel(3);
        assert_eq!(c.go_to(2).url, "2.jpg");
        assert_eq!(c.go_to(4).index, 1);
    }

    #[test]
    fn test_controls_need_two_images() {
        assert!(!carousel(1).has_controls());
        assert!(carousel(2).has_controls());
    }

    #[test]
    fn test_swipe_directions() {
        let mut tracker = SwipeTracker::new(50.0);

        tracker.touch_start(200.0);
        assert_eq!(tracker.touch_end(100.0), Some(Swipe::Left));

        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(200.0), Some(Swipe::Right));
    }

    #[test]
    fn test_short_swipe_is_ignored() {
        let mut tracker = SwipeTracker::new(50.0);
        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(150.0), None);
        tracker.touch_start(100.0);
        assert_eq!(tracker.touch_end(50.0), None);
    }

    #[test]
    fn test_touch_end_without_start() {
        let mut tracker = SwipeTracker::new(50.0);
        assert_eq!(tracker.touch_end(0.0), None);
    }
}
