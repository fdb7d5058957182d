use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

use tokio::runtime::Handle;

use crate::bites::demo_items::DemoItem;
use crate::bites::infinite::{
    spawn_fetch, FetchCompletion, FetchTicket, LoadOutcome, Producer, VisibilityObserver,
};
use crate::catalog::Route;
use crate::config::ConfigStore;
use crate::theme::{ThemeController, ThemeMode};
use crate::ui::events::AppEvent;
use crate::ui::landing::{LandingIntent, LandingReducer, LandingState};
use crate::ui::layout::scroll_list_rect;
use crate::ui::mvi::Reducer;
use crate::ui::scroll_page::ScrollPage;
use crate::ui::search_page::SearchPage;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Runs producer calls on the tokio runtime and posts their results back
/// into the event loop.
#[derive(Clone)]
pub struct FetchSpawner {
    handle: Handle,
    events: Sender<AppEvent>,
}

impl FetchSpawner {
    pub fn new(handle: Handle, events: Sender<AppEvent>) -> Self {
        Self { handle, events }
    }

    fn spawn(&self, producer: Arc<dyn Producer<DemoItem>>, ticket: FetchTicket) {
        let events = self.events.clone();
        spawn_fetch(&self.handle, producer, ticket, move |completion| {
            if events.send(AppEvent::Fetch(completion)).is_err() {
                tracing::debug!("event loop gone, dropping fetch result");
            }
        });
    }
}

/// The page currently on screen. Leaving a page drops its state.
pub enum Page {
    Landing,
    Search(SearchPage),
    Scroll(ScrollPage),
}

pub struct App {
    should_quit: bool,
    size: Option<(u16, u16)>,
    config: ConfigStore,
    theme: ThemeController,
    /// Landing page state (MVI pattern).
    landing: LandingState,
    page: Page,
    observer: VisibilityObserver,
    fetch_spawner: Option<FetchSpawner>,
    ticks: u64,
    notice: Option<String>,
}

impl App {
    pub fn new(config: ConfigStore, theme: ThemeController) -> Self {
        Self {
            should_quit: false,
            size: None,
            config,
            theme,
            landing: LandingState::default(),
            page: Page::Landing,
            observer: VisibilityObserver::new(),
            fetch_spawner: None,
            ticks: 0,
            notice: None,
        }
    }

    pub fn set_fetch_spawner(&mut self, spawner: FetchSpawner) {
        self.fetch_spawner = Some(spawner);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn route(&self) -> Route {
        match self.page {
            Page::Landing => Route::Landing,
            Page::Search(_) => Route::DebounceSearch,
            Page::Scroll(_) => Route::InfiniteScroll,
        }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn landing(&self) -> &LandingState {
        &self.landing
    }

    pub fn search_page(&self) -> Option<&SearchPage> {
        match &self.page {
            Page::Search(page) => Some(page),
            _ => None,
        }
    }

    pub fn search_page_mut(&mut self) -> Option<&mut SearchPage> {
        match &mut self.page {
            Page::Search(page) => Some(page),
            _ => None,
        }
    }

    pub fn scroll_page(&self) -> Option<&ScrollPage> {
        match &self.page {
            Page::Scroll(page) => Some(page),
            _ => None,
        }
    }

    pub fn scroll_page_mut(&mut self) -> Option<&mut ScrollPage> {
        match &mut self.page {
            Page::Scroll(page) => Some(page),
            _ => None,
        }
    }

    pub fn observer(&self) -> &VisibilityObserver {
        &self.observer
    }

    /// Tick counter, used for spinner frames.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One-line message shown in the footer until the next key press.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn dispatch_landing(&mut self, intent: LandingIntent) {
        dispatch_mvi!(self, landing, LandingReducer, intent);
    }

    /// Replace the current page. The previous page's state is dropped.
    pub fn open(&mut self, route: Route) {
        let config = self.config.get();
        self.page = match route {
            Route::Landing => Page::Landing,
            Route::DebounceSearch => Page::Search(SearchPage::new(&config.search)),
            Route::InfiniteScroll => Page::Scroll(ScrollPage::new(
                &config,
                &self.observer,
                self.scroll_viewport_height(),
            )),
        };
        tracing::info!(route = route.title(), "page opened");
    }

    pub fn open_selected(&mut self) {
        if let Some(bite) = self.landing.selected_bite() {
            self.open(bite.route);
        }
    }

    pub fn go_back(&mut self) {
        self.open(Route::Landing);
    }

    /// Drop the current page, cancelling its timers and fetches.
    pub fn close_page(&mut self) {
        self.page = Page::Landing;
    }

    pub fn toggle_theme(&mut self) {
        let mode = self.theme.toggle();
        tracing::info!(%mode, "theme toggled");
    }

    pub fn reload_config(&mut self) {
        self.notice = Some(match self.config.reload() {
            Ok(()) => "Config reloaded".to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "config reload failed");
                format!("Config error: {err}")
            }
        });
    }

    pub fn on_tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        if self.theme.sync_external() {
            tracing::info!(mode = %self.theme.mode(), "theme changed by another session");
        }
    }

    pub fn on_resize(&mut self, cols: u16, rows: u16) {
        self.size = Some((cols, rows));
        let height = self.scroll_viewport_height();
        if let Some(page) = self.scroll_page_mut() {
            page.set_viewport_height(height);
        }
    }

    fn scroll_viewport_height(&self) -> usize {
        self.size
            .map_or(0, |(cols, rows)| scroll_list_rect(cols, rows).height as usize)
    }

    /// Advance debounce timers and start fetches whose sentinel came into range.
    pub fn poll_timers(&mut self, now: Instant) {
        let mut request = None;
        match &mut self.page {
            Page::Landing => {}
            Page::Search(page) => {
                page.poll(now);
            }
            Page::Scroll(page) => {
                if let Some(ticket) = page.poll_visibility(now) {
                    request = Some((page.producer(), ticket));
                }
            }
        }
        if let Some((producer, ticket)) = request {
            match &self.fetch_spawner {
                Some(spawner) => spawner.spawn(producer, ticket),
                None => tracing::warn!("no fetch runtime attached, fetch left pending"),
            }
        }
    }

    /// Earliest instant a timer needs servicing, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search_page().and_then(SearchPage::next_deadline)
    }

    pub fn on_fetch(&mut self, completion: FetchCompletion<DemoItem>, now: Instant) -> LoadOutcome {
        match &mut self.page {
            Page::Scroll(page) if page.loader().id() == completion.ticket.loader() => {
                page.on_fetch(completion, now)
            }
            _ => {
                tracing::debug!("fetch result for a closed page discarded");
                LoadOutcome::Discarded
            }
        }
    }
}
