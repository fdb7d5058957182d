//! Paged, append-only item collection with a single in-flight fetch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use super::producer::ProducerError;

static NEXT_LOADER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one loader instance. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoaderId(u64);

impl LoaderId {
    fn next() -> Self {
        Self(NEXT_LOADER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Token for one started fetch. Its result is only applied while the ticket
/// is still the loader's in-flight ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    loader: LoaderId,
    seq: u64,
}

impl FetchTicket {
    pub fn loader(&self) -> LoaderId {
        self.loader
    }
}

/// Bounded retry with exponential backoff after producer failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Consecutive failures after which the loader stops for good.
    pub max_attempts: u32,
    /// Wait after the first failure; doubles with each further failure.
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    /// Backoff to wait after the `failures`-th consecutive failure.
    pub fn backoff_for(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(500))
    }
}

/// What a completed fetch did to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Appended(usize),
    Exhausted,
    Failed { retry_at: Instant },
    GaveUp { attempts: u32 },
    /// The ticket was stale or belonged to another loader.
    Discarded,
}

#[derive(Debug)]
pub struct InfiniteLoader<T> {
    id: LoaderId,
    items: Vec<T>,
    has_more: bool,
    in_flight: Option<FetchTicket>,
    next_seq: u64,
    torn_down: bool,
    retry: RetryPolicy,
    failures: u32,
    retry_at: Option<Instant>,
    last_error: Option<String>,
    fetches_started: u64,
}

impl<T> InfiniteLoader<T> {
    pub fn new(retry: RetryPolicy) -> Self {
        Self::with_items(Vec::new(), retry)
    }

    /// Start from items that are already on screen.
    pub fn with_items(items: Vec<T>, retry: RetryPolicy) -> Self {
        Self {
            id: LoaderId::next(),
            items,
            has_more: true,
            in_flight: None,
            next_seq: 0,
            torn_down: false,
            retry,
            failures: 0,
            retry_at: None,
            last_error: None,
            fetches_started: 0,
        }
    }

    pub fn id(&self) -> LoaderId {
        self.id
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn fetches_started(&self) -> u64 {
        self.fetches_started
    }

    /// React to a visibility report from the sentinel binding.
    pub fn trigger(&mut self, visible: bool, now: Instant) -> Option<FetchTicket> {
        if !visible {
            return None;
        }
        self.begin(now)
    }

    /// Start a fetch if none is in flight, more items may exist, and any
    /// retry backoff has elapsed.
    pub fn begin(&mut self, now: Instant) -> Option<FetchTicket> {
        if self.torn_down || self.in_flight.is_some() || !self.has_more {
            return None;
        }
        if matches!(self.retry_at, Some(at) if now < at) {
            tracing::trace!(loader = self.id.0, "fetch suppressed during backoff");
            return None;
        }

        self.next_seq += 1;
        let ticket = FetchTicket {
            loader: self.id,
            seq: self.next_seq,
        };
        self.in_flight = Some(ticket);
        self.fetches_started += 1;
        tracing::debug!(loader = self.id.0, seq = ticket.seq, "fetch started");
        Some(ticket)
    }

    /// Apply the result of the fetch identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<T>, ProducerError>,
        now: Instant,
    ) -> LoadOutcome {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                loader = self.id.0,
                seq = ticket.seq,
                "discarding result of stale fetch"
            );
            return LoadOutcome::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(batch) if batch.is_empty() => {
                self.has_more = false;
                self.reset_failures();
                tracing::debug!(loader = self.id.0, total = self.items.len(), "producer exhausted");
                LoadOutcome::Exhausted
            }
            Ok(batch) => {
                let count = batch.len();
                self.items.extend(batch);
                self.reset_failures();
                tracing::debug!(loader = self.id.0, count, total = self.items.len(), "batch appended");
                LoadOutcome::Appended(count)
            }
            Err(err) => {
                self.failures += 1;
                self.last_error = Some(err.message().to_string());
                if self.failures >= self.retry.max_attempts {
                    self.has_more = false;
                    self.retry_at = None;
                    tracing::warn!(
                        loader = self.id.0,
                        attempts = self.failures,
                        error = %err,
                        "giving up after repeated fetch failures"
                    );
                    return LoadOutcome::GaveUp {
                        attempts: self.failures,
                    };
                }
                let retry_at = now + self.retry.backoff_for(self.failures);
                self.retry_at = Some(retry_at);
                tracing::warn!(
                    loader = self.id.0,
                    attempt = self.failures,
                    error = %err,
                    "fetch failed, will retry"
                );
                LoadOutcome::Failed { retry_at }
            }
        }
    }

    /// Stop accepting work. Any in-flight result will be discarded.
    pub fn teardown(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            tracing::debug!(loader = self.id.0, seq = ticket.seq, "torn down with fetch in flight");
        }
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn reset_failures(&mut self) {
        self.failures = 0;
        self.retry_at = None;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn second_begin_is_suppressed_while_in_flight() {
        let now = Instant::now();
        let mut loader: InfiniteLoader<u32> = InfiniteLoader::new(RetryPolicy::default());

        let ticket = loader.begin(now).expect("first fetch starts");
        assert!(loader.is_loading());
        assert!(loader.begin(now).is_none());

        assert_eq!(loader.complete(ticket, Ok(vec![1, 2]), now), LoadOutcome::Appended(2));
        assert!(!loader.is_loading());
        assert!(loader.begin(now).is_some());
    }

    #[test]
    fn invisible_trigger_does_nothing() {
        let mut loader: InfiniteLoader<u32> = InfiniteLoader::new(RetryPolicy::default());
        assert!(loader.trigger(false, Instant::now()).is_none());
        assert_eq!(loader.fetches_started(), 0);
    }

    #[test]
    fn seeded_items_come_first() {
        let now = Instant::now();
        let mut loader = InfiniteLoader::with_items(vec![1, 2, 3], RetryPolicy::default());
        let ticket = loader.begin(now).unwrap();
        loader.complete(ticket, Ok(vec![4]), now);
        assert_eq!(loader.items(), &[1, 2, 3, 4]);
    }

    #[test]
    fn empty_batch_exhausts_permanently() {
        let now = Instant::now();
        let mut loader: InfiniteLoader<u32> = InfiniteLoader::new(RetryPolicy::default());

        let ticket = loader.begin(now).unwrap();
        assert_eq!(loader.complete(ticket, Ok(vec![]), now), LoadOutcome::Exhausted);
        assert!(!loader.has_more());
        assert!(loader.begin(now + ms(10_000)).is_none());
    }

    #[test]
    fn failure_keeps_items_and_clears_loading() {
        let now = Instant::now();
        let mut loader = InfiniteLoader::with_items(vec![1], RetryPolicy::new(3, ms(100)));

        let ticket = loader.begin(now).unwrap();
        let outcome = loader.complete(ticket, Err(ProducerError::new("boom")), now);
        assert_eq!(outcome, LoadOutcome::Failed { retry_at: now + ms(100) });
        assert_eq!(loader.items(), &[1]);
        assert!(!loader.is_loading());
        assert!(loader.has_more());
        assert_eq!(loader.last_error(), Some("boom"));
    }

    #[test]
    fn backoff_doubles_and_blocks_early_retries() {
        let now = Instant::now();
        let mut loader: InfiniteLoader<u32> = InfiniteLoader::new(RetryPolicy::new(5, ms(100)));

        let ticket = loader.begin(now).unwrap();
        loader.complete(ticket, Err(ProducerError::new("down")), now);
        assert!(loader.begin(now + ms(99)).is_none());

        let at = now + ms(100);
        let ticket = loader.begin(at).expect("retry after backoff");
        let outcome = loader.complete(ticket, Err(ProducerError::new("down")), at);
        assert_eq!(outcome, LoadOutcome::Failed { retry_at: at + ms(200) });
        assert!(loader.begin(at + ms(199)).is_none());
        assert!(loader.begin(at + ms(200)).is_some());
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let now = Instant::now();
        let mut loader: InfiniteLoader<u32> = InfiniteLoader::new(RetryPolicy::new(2, Duration::ZERO));

        let ticket = loader.begin(now).unwrap();
        loader.complete(ticket, Err(ProducerError::new("x")), now);
        let ticket = loader.begin(now).unwrap();
        assert_eq!(
            loader.complete(ticket, Err(ProducerError::new("x")), now),
            LoadOutcome::GaveUp { attempts: 2 }
        );
        assert!(!loader.has_more());
        assert!(loader.begin(now).is_none());
        assert_eq!(loader.last_error(), Some("x"));
    }

    #[test]
    fn success_resets_failure_count() {
        let now = Instant::now();
        let mut loader: InfiniteLoader<u32> = InfiniteLoader::new(RetryPolicy::new(2, Duration::ZERO));

        let ticket = loader.begin(now).unwrap();
        loader.complete(ticket, Err(ProducerError::new("x")), now);
        let ticket = loader.begin(now).unwrap();
        loader.complete(ticket, Ok(vec![1]), now);
        assert_eq!(loader.failures(), 0);
        assert_eq!(loader.last_error(), None);
    }

    #[test]
    fn result_after_teardown_is_discarded() {
        let now = Instant::now();
        let mut loader: InfiniteLoader<u32> = InfiniteLoader::new(RetryPolicy::default());

        let ticket = loader.begin(now).unwrap();
        loader.teardown();
        assert!(!loader.is_loading());
        assert_eq!(loader.complete(ticket, Ok(vec![9]), now), LoadOutcome::Discarded);
        assert!(loader.items().is_empty());
        assert!(loader.begin(now).is_none());
    }

    #[test]
    fn foreign_ticket_is_discarded() {
        let now = Instant::now();
        let mut first: InfiniteLoader<u32> = InfiniteLoader::new(RetryPolicy::default());
        let mut second: InfiniteLoader<u32> = InfiniteLoader::new(RetryPolicy::default());

        let foreign = first.begin(now).unwrap();
        let _own = second.begin(now).unwrap();
        assert_eq!(second.complete(foreign, Ok(vec![1]), now), LoadOutcome::Discarded);
        assert!(second.is_loading());
    }

    #[test]
    fn backoff_saturates() {
        let policy = RetryPolicy::new(100, Duration::from_secs(u64::MAX / 2));
        assert_eq!(policy.backoff_for(50), Duration::MAX);
    }
}
