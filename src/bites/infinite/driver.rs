//! Runs producer calls on a tokio runtime and reports completions back to
//! the owning event loop.

use std::sync::Arc;

use scopeguard::ScopeGuard;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::loader::FetchTicket;
use super::producer::{Producer, ProducerError};

/// Result of one producer call, tagged with the ticket that started it.
#[derive(Debug)]
pub struct FetchCompletion<T> {
    pub ticket: FetchTicket,
    pub result: Result<Vec<T>, ProducerError>,
}

/// Spawn `producer.fetch_more()` and hand its result to `sink`.
///
/// The sink is called exactly once. If the task is dropped before the
/// producer finishes (abort, panic, or runtime shutdown), the sink receives a
/// [`ProducerError`] so the loader never stays stuck in the loading state.
pub fn spawn_fetch<T, S>(
    handle: &Handle,
    producer: Arc<dyn Producer<T>>,
    ticket: FetchTicket,
    sink: S,
) -> JoinHandle<()>
where
    T: Send + 'static,
    S: FnOnce(FetchCompletion<T>) + Send + 'static,
{
    let guard = scopeguard::guard((sink, ticket), |(sink, ticket)| {
        tracing::warn!("fetch task ended before the producer finished");
        sink(FetchCompletion {
            ticket,
            result: Err(ProducerError::new("fetch was interrupted")),
        });
    });

    handle.spawn(async move {
        let result = producer.fetch_more().await;
        let (sink, ticket) = ScopeGuard::into_inner(guard);
        sink(FetchCompletion { ticket, result });
    })
}
