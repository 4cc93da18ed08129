//! Page controller
//!
//! [`Page`] owns every piece of interactive state: the loaded posts, the
//! search query, one carousel per visible card, the shared fullscreen viewer,
//! the scroll controls and the theme. Input events become [`Command`]s, and
//! each command returns the [`Effect`]s the host has to apply to the
//! document.

use std::collections::BTreeMap;
use std::time::Instant;

use super::carousel::{CarouselState, Frame, Swipe, SwipeTracker};
use super::fullscreen::{FullscreenFrame, FullscreenViewer};
use super::input::{click_command, key_command, Command, InputEvent};
use super::scroll::{ScrollButtons, ScrollControls};
use super::search::{build_index, filter_posts, IndexEntry};
use super::theme::{Theme, ThemeController};
use crate::config::SiteConfig;
use crate::content::{anchor_for, LoadError, PostRecord};
use crate::render::{ListView, Renderer};
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Bottom,
}

/// A document mutation for the host to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the whole post list
    RenderList(ListView),
    /// Replace the navigation list
    RenderIndex(Vec<IndexEntry>),
    /// Swap a carousel's foreground and background image
    ShowCarouselImage {
        post_id: i64,
        url: String,
        preload: String,
    },
    ShowFullscreen(FullscreenFrame),
    /// Hide the overlay and clear its image source
    HideFullscreen,
    /// Smooth-scroll a card into view
    ScrollIntoView { anchor: String },
    /// Smooth-scroll to an extreme of the document
    ScrollTo(ScrollTarget),
    ApplyTheme(Theme),
    SetScrollButtons(ScrollButtons),
}

/// Load outcome the page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Pending,
    Loaded,
    Failed,
}

pub struct Page<S> {
    renderer: Renderer,
    empty_message: String,
    no_results_message: String,
    error_message: String,
    swipe_threshold: f64,

    load_state: LoadState,
    posts: Vec<PostRecord>,
    query: String,
    carousels: BTreeMap<i64, CarouselState>,
    swipes: BTreeMap<i64, SwipeTracker>,
    fullscreen: FullscreenViewer,
    scroll: ScrollControls,
    theme: ThemeController<S>,
}

impl<S: KeyValueStore> Page<S> {
    /// Create the page and resolve the starting theme
    pub fn new(config: &SiteConfig, store: S, system_prefers_dark: bool) -> (Self, Vec<Effect>) {
        let theme = ThemeController::init(store, system_prefers_dark);
        let startup = vec![Effect::ApplyTheme(theme.current())];

        let page = Self {
            renderer: Renderer::from_config(config),
            empty_message: config.empty_message.clone(),
            no_results_message: config.no_results_message.clone(),
            error_message: config.error_message.clone(),
            swipe_threshold: config.carousel.swipe_threshold,

            load_state: LoadState::Pending,
            posts: Vec::new(),
            query: String::new(),
            carousels: BTreeMap::new(),
            swipes: BTreeMap::new(),
            fullscreen: FullscreenViewer::new(),
            scroll: ScrollControls::new(&config.scroll),
            theme,
        };
        (page, startup)
    }

    /// Install the result of a load, replacing any previous post set
    pub fn load(&mut self, result: Result<Vec<PostRecord>, LoadError>) -> Vec<Effect> {
        self.query.clear();
        match result {
            Ok(posts) => {
                self.load_state = LoadState::Loaded;
                let index = build_index(&posts);
                let all: Vec<&PostRecord> = posts.iter().collect();
                let message = self.empty_message.clone();
                let list = self.rebuild(&all, &message);
                self.posts = posts;
                vec![Effect::RenderList(list), Effect::RenderIndex(index)]
            }
            Err(e) => {
                tracing::error!("Could not load posts: {}", e);
                self.load_state = LoadState::Failed;
                self.posts.clear();
                self.carousels.clear();
                self.swipes.clear();
                vec![
                    Effect::RenderList(ListView::Error(self.error_message.clone())),
                    Effect::RenderIndex(Vec::new()),
                ]
            }
        }
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn carousel(&self, post_id: i64) -> Option<&CarouselState> {
        self.carousels.get(&post_id)
    }

    pub fn fullscreen(&self) -> &FullscreenViewer {
        &self.fullscreen
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn scroll_buttons(&self) -> ScrollButtons {
        self.scroll.buttons()
    }

    /// Translate a raw input event and dispatch it
    pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
        self.handle_at(event, Instant::now())
    }

    pub fn handle_at(&mut self, event: InputEvent, now: Instant) -> Vec<Effect> {
        match self.command_for(event) {
            Some(command) => self.dispatch_at(command, now),
            None => Vec::new(),
        }
    }

    fn command_for(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::Click(target) => click_command(target),
            InputEvent::KeyDown(key) => key_command(&key, self.fullscreen.is_open()),
            InputEvent::SearchInput(query) => Some(Command::Search(query)),
            InputEvent::Scroll(metrics) => Some(Command::Scrolled(metrics)),
            InputEvent::TouchStart { post_id, x } => {
                if let Some(tracker) = self.swipes.get_mut(&post_id) {
                    tracker.touch_start(x);
                }
                None
            }
            InputEvent::TouchEnd { post_id, x } => {
                match self.swipes.get_mut(&post_id)?.touch_end(x)? {
                    Swipe::Left => Some(Command::CarouselNext(post_id)),
                    Swipe::Right => Some(Command::CarouselPrev(post_id)),
                }
            }
        }
    }

    /// Apply a command
    pub fn dispatch(&mut self, command: Command) -> Vec<Effect> {
        self.dispatch_at(command, Instant::now())
    }

    pub fn dispatch_at(&mut self, command: Command, now: Instant) -> Vec<Effect> {
        match command {
            Command::CarouselNext(id) => self.step_carousel(id, CarouselState::next),
            Command::CarouselPrev(id) => self.step_carousel(id, CarouselState::prev),
            Command::OpenFullscreen(id) => {
                let Some(carousel) = self.carousels.get(&id) else {
                    return Vec::new();
                };
                let images = carousel.images().to_vec();
                let start = carousel.current_index();
                self.fullscreen
                    .open(images, start)
                    .map(Effect::ShowFullscreen)
                    .into_iter()
                    .collect()
            }
            Command::FullscreenNext => self
                .fullscreen
                .next()
                .map(Effect::ShowFullscreen)
                .into_iter()
                .collect(),
            Command::FullscreenPrev => self
                .fullscreen
                .prev()
                .map(Effect::ShowFullscreen)
                .into_iter()
                .collect(),
            Command::CloseFullscreen => {
                if self.fullscreen.close() {
                    vec![Effect::HideFullscreen]
                } else {
                    Vec::new()
                }
            }
            Command::Search(query) => self.search(query),
            Command::ScrollIntoView(id) => vec![Effect::ScrollIntoView {
                anchor: anchor_for(id),
            }],
            Command::ToggleTheme => {
                if let Err(e) = self.theme.toggle() {
                    tracing::warn!("Could not persist theme: {}", e);
                }
                vec![Effect::ApplyTheme(self.theme.current())]
            }
            Command::Scrolled(metrics) => {
                vec![Effect::SetScrollButtons(self.scroll.on_scroll(metrics, now))]
            }
            Command::Tick => self
                .scroll
                .tick(now)
                .map(Effect::SetScrollButtons)
                .into_iter()
                .collect(),
            Command::ScrollToTop => vec![Effect::ScrollTo(ScrollTarget::Top)],
            Command::ScrollToBottom => vec![Effect::ScrollTo(ScrollTarget::Bottom)],
        }
    }

    fn step_carousel(&mut self, id: i64, step: fn(&mut CarouselState) -> Frame) -> Vec<Effect> {
        match self.carousels.get_mut(&id) {
            Some(carousel) if carousel.has_controls() => {
                let frame = step(carousel);
                vec![Effect::ShowCarouselImage {
                    post_id: id,
                    url: frame.url,
                    preload: frame.preload,
                }]
            }
            _ => Vec::new(),
        }
    }

    fn search(&mut self, query: String) -> Vec<Effect> {
        if self.load_state != LoadState::Loaded {
            return Vec::new();
        }

        let posts = std::mem::take(&mut self.posts);
        let matching = filter_posts(&posts, &query);
        tracing::debug!("Search {:?} matched {} posts", query, matching.len());

        let message = if query.is_empty() {
            self.empty_message.clone()
        } else {
            self.no_results_message.clone()
        };
        let list = self.rebuild(&matching, &message);

        self.posts = posts;
        self.query = query;
        vec![Effect::RenderList(list)]
    }

    /// Render `visible` from scratch and replace every carousel
    fn rebuild(&mut self, visible: &[&PostRecord], empty_message: &str) -> ListView {
        self.carousels.clear();
        self.swipes.clear();

        for post in visible {
            if let Some(carousel) = CarouselState::new(post.images.clone()) {
                if carousel.has_controls() {
                    self.swipes
                        .insert(post.id, SwipeTracker::new(self.swipe_threshold));
                }
                self.carousels.insert(post.id, carousel);
            }
        }

        self.renderer
            .render_list(visible.iter().copied(), empty_message)
    }
}
