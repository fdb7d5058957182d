//! State of the infinite scroll page.

use std::sync::Arc;
use std::time::Instant;

use crate::bites::demo_items::{generate_items, DemoItem, DemoItemProducer};
use crate::bites::infinite::{
    FetchCompletion, FetchTicket, InfiniteLoader, LoadOutcome, Producer, RetryPolicy,
    SentinelBinding, Viewport, VisibilityObserver,
};
use crate::config::Config;

/// Rows taken by one item card, including its trailing gap.
pub const ITEM_ROWS: usize = 4;
/// Rows below the last card that hold the loading/end status.
pub const STATUS_ROWS: usize = 2;

pub struct ScrollPage {
    loader: InfiniteLoader<DemoItem>,
    producer: Arc<DemoItemProducer>,
    binding: SentinelBinding,
    offset: usize,
    viewport_height: usize,
}

impl ScrollPage {
    pub fn new(config: &Config, observer: &VisibilityObserver, viewport_height: usize) -> Self {
        let scroll = &config.scroll;
        let initial = scroll
            .max_items
            .map_or(scroll.initial_items, |max| scroll.initial_items.min(max));
        let producer = DemoItemProducer::new(initial, scroll.page_size, scroll.fetch_latency())
            .with_max_items(scroll.max_items)
            .with_fail_every(scroll.fail_every);
        tracing::info!(
            initial,
            page_size = scroll.page_size,
            threshold = scroll.threshold,
            "infinite scroll opened"
        );
        Self {
            loader: InfiniteLoader::with_items(
                generate_items(0, initial),
                RetryPolicy::from(&config.retry),
            ),
            producer: Arc::new(producer),
            binding: observer.observe(scroll.threshold),
            offset: 0,
            viewport_height,
        }
    }

    pub fn loader(&self) -> &InfiniteLoader<DemoItem> {
        &self.loader
    }

    pub fn producer(&self) -> Arc<dyn Producer<DemoItem>> {
        self.producer.clone()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.offset, self.viewport_height)
    }

    /// Row just below the last card.
    pub fn sentinel_row(&self) -> usize {
        self.loader.items().len() * ITEM_ROWS
    }

    fn max_offset(&self) -> usize {
        (self.sentinel_row() + STATUS_ROWS).saturating_sub(self.viewport_height)
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn page_rows(&self) -> usize {
        self.viewport_height.max(1)
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset
                .saturating_add(delta.unsigned_abs())
                .min(self.max_offset())
        };
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Check the sentinel and start a fetch if it just came into range.
    pub fn poll_visibility(&mut self, now: Instant) -> Option<FetchTicket> {
        let visible = self.binding.check(self.sentinel_row(), self.viewport())?;
        let ticket = self.loader.trigger(visible, now);
        if ticket.is_none() && visible && self.loader.has_more() && !self.loader.is_loading() {
            // Refused during retry backoff: keep asking until it elapses.
            self.binding.rearm();
        }
        ticket
    }

    pub fn on_fetch(&mut self, completion: FetchCompletion<DemoItem>, now: Instant) -> LoadOutcome {
        let outcome = self
            .loader
            .complete(completion.ticket, completion.result, now);
        if outcome != LoadOutcome::Discarded {
            self.binding.rearm();
        }
        outcome
    }
}

impl Drop for ScrollPage {
    fn drop(&mut self) {
        self.loader.teardown();
    }
}
