//! Sample data and a simulated slow producer for the infinite scroll page.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use crate::bites::infinite::{FetchFuture, Producer, ProducerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoItem {
    pub id: usize,
    pub title: String,
    pub description: String,
}

impl DemoItem {
    pub fn new(id: usize) -> Self {
        let number = id + 1;
        Self {
            id,
            title: format!("Item {number}"),
            description: format!(
                "This is a sample item demonstrating infinite scroll. Item number {number}. \
                 Scroll down to load more items automatically."
            ),
        }
    }
}

pub fn generate_items(start_id: usize, count: usize) -> Vec<DemoItem> {
    (start_id..start_id + count).map(DemoItem::new).collect()
}

/// Producer that hands out consecutive items after an artificial delay.
///
/// With `max_items` set it runs dry there and returns an empty batch. With
/// `fail_every = n > 0`, every n-th call fails without consuming ids.
#[derive(Debug)]
pub struct DemoItemProducer {
    next_id: Mutex<usize>,
    page_size: usize,
    latency: Duration,
    max_items: Option<usize>,
    fail_every: u32,
    calls: AtomicU32,
}

impl DemoItemProducer {
    pub fn new(first_id: usize, page_size: usize, latency: Duration) -> Self {
        Self {
            next_id: Mutex::new(first_id),
            page_size,
            latency,
            max_items: None,
            fail_every: 0,
            calls: AtomicU32::new(0),
        }
    }

    pub fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_fail_every(mut self, fail_every: u32) -> Self {
        self.fail_every = fail_every;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    fn take_batch(&self) -> Vec<DemoItem> {
        let mut next_id = self.next_id.lock();
        let remaining = self
            .max_items
            .map_or(self.page_size, |max| max.saturating_sub(*next_id));
        let count = self.page_size.min(remaining);
        let batch = generate_items(*next_id, count);
        *next_id += count;
        batch
    }
}

impl Producer<DemoItem> for DemoItemProducer {
    fn fetch_more(&self) -> FetchFuture<DemoItem> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        let fails = self.fail_every > 0 && call % self.fail_every == 0;
        let batch = if fails { Vec::new() } else { self.take_batch() };
        let latency = self.latency;

        Box::pin(async move {
            tokio::time::sleep(latency).await;
            if fails {
                return Err(ProducerError::new(format!("simulated failure on call {call}")));
            }
            Ok(batch)
        })
    }
}
