//! Infinite scroll: an append-only loader fed by an asynchronous producer
//! whenever a sentinel row comes into view.

mod driver;
mod loader;
mod observer;
mod producer;

pub use driver::{spawn_fetch, FetchCompletion};
pub use loader::{FetchTicket, InfiniteLoader, LoadOutcome, LoaderId, RetryPolicy};
pub use observer::{SentinelBinding, Viewport, VisibilityObserver};
pub use producer::{FetchFuture, Producer, ProducerError};
