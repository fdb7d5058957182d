//! Trailing-edge debounce driven by the owning event loop.
//!
//! The pending timer is a deadline plus the value captured when it was
//! scheduled. The loop feeds instants in through [`Debounced::set`] and
//! [`Debounced::poll`], and uses [`Debounced::deadline`] to decide how long
//! it may sleep.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct PendingEmit<T> {
    due: Instant,
    value: T,
}

/// A value that only settles after it stopped changing for `delay`.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    raw: T,
    settled: T,
    delay: Duration,
    pending: Option<PendingEmit<T>>,
}

impl<T: Clone + PartialEq> Debounced<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            raw: initial.clone(),
            settled: initial,
            delay,
            pending: None,
        }
    }

    /// Record a new raw value and restart the quiet period.
    ///
    /// Setting the value it already holds is not a change and leaves any
    /// pending emit untouched.
    pub fn set(&mut self, value: T, now: Instant) {
        if value == self.raw {
            return;
        }
        self.raw = value.clone();
        self.pending = Some(PendingEmit {
            due: now + self.delay,
            value,
        });
    }

    /// Fire the pending emit if its deadline has passed.
    ///
    /// Returns the newly settled value, or `None` when nothing was due or the
    /// captured value equals what already settled.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().map(|pending| pending.due)?;
        if now < due {
            return None;
        }
        let PendingEmit { value, .. } = self.pending.take()?;
        if value == self.settled {
            return None;
        }
        self.settled = value.clone();
        Some(value)
    }

    /// Drop the pending emit, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn raw(&self) -> &T {
        &self.raw
    }

    pub fn settled(&self) -> &T {
        &self.settled
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
