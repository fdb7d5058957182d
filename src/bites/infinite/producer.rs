use std::future::Future;

use futures_core::future::BoxFuture;
use thiserror::Error;

/// Failure reported by a producer. Carries a display message only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProducerError {
    message: String,
}

impl ProducerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type FetchFuture<T> = BoxFuture<'static, Result<Vec<T>, ProducerError>>;

/// Source of further pages for an [`InfiniteLoader`](super::InfiniteLoader).
///
/// An empty batch means the source is exhausted. Closures returning a
/// `Send` future implement this directly.
pub trait Producer<T>: Send + Sync {
    fn fetch_more(&self) -> FetchFuture<T>;
}

impl<T, F, Fut> Producer<T> for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>, ProducerError>> + Send + 'static,
{
    fn fetch_more(&self) -> FetchFuture<T> {
        Box::pin(self())
    }
}
