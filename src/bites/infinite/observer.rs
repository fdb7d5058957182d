//! Sentinel visibility tracking for scroll containers.
//!
//! A [`VisibilityObserver`] hands out [`SentinelBinding`]s. Each binding
//! reports when its sentinel row crosses into or out of the viewport, widened
//! by a proximity margin. Dropping a binding unregisters it.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Visible window of a scroll container, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(offset: usize, height: usize) -> Self {
        Self { offset, height }
    }

    /// True when `row` lies above the bottom edge extended by `margin`.
    pub fn reaches(&self, row: usize, margin: usize) -> bool {
        row < self
            .offset
            .saturating_add(self.height)
            .saturating_add(margin)
    }
}

#[derive(Debug)]
struct Registration {
    margin: usize,
    last: Option<bool>,
}

#[derive(Debug, Default)]
struct ObserverInner {
    next_id: u64,
    registrations: HashMap<u64, Registration>,
}

#[derive(Debug, Clone, Default)]
pub struct VisibilityObserver {
    inner: Arc<Mutex<ObserverInner>>,
}

impl VisibilityObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sentinel with the given proximity margin.
    pub fn observe(&self, margin: usize) -> SentinelBinding {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner
            .registrations
            .insert(id, Registration { margin, last: None });
        tracing::debug!(binding = id, margin, "sentinel bound");
        SentinelBinding {
            id,
            observer: Arc::downgrade(&self.inner),
        }
    }

    pub fn active_bindings(&self) -> usize {
        self.inner.lock().registrations.len()
    }
}

/// Registration of one sentinel. Released on drop.
#[derive(Debug)]
pub struct SentinelBinding {
    id: u64,
    observer: Weak<Mutex<ObserverInner>>,
}

impl SentinelBinding {
    /// Report the sentinel's visibility if it changed since the last check.
    ///
    /// The first check after binding or [`rearm`](Self::rearm) always
    /// reports.
    pub fn check(&self, sentinel_row: usize, viewport: Viewport) -> Option<bool> {
        let observer = self.observer.upgrade()?;
        let mut inner = observer.lock();
        let registration = inner.registrations.get_mut(&self.id)?;
        let visible = viewport.reaches(sentinel_row, registration.margin);
        if registration.last == Some(visible) {
            return None;
        }
        registration.last = Some(visible);
        Some(visible)
    }

    /// Forget the last reported state so the next check reports again.
    pub fn rearm(&self) {
        if let Some(observer) = self.observer.upgrade() {
            if let Some(registration) = observer.lock().registrations.get_mut(&self.id) {
                registration.last = None;
            }
        }
    }

    pub fn margin(&self) -> Option<usize> {
        let observer = self.observer.upgrade()?;
        let inner = observer.lock();
        inner.registrations.get(&self.id).map(|r| r.margin)
    }
}

impl Drop for SentinelBinding {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.upgrade() {
            observer.lock().registrations.remove(&self.id);
            tracing::debug!(binding = self.id, "sentinel released");
        }
    }
}
