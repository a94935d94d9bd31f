use std::future::Future;

use futures::future::{AbortHandle, Abortable};

use crate::utils::new_subscription_id;

/// Handle to a spawned pipeline, cancelled with [`Subscription::unsubscribe`].
///
/// Dropping the handle does not cancel the pipeline.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    abort_handle: AbortHandle,
}

impl Subscription {
    /// Spawn `fut` onto the leptos executor.
    pub(crate) fn spawn(fut: impl Future<Output = ()> + Send + 'static) -> Self {
        let (abort_handle, registration) = AbortHandle::new_pair();
        let id = new_subscription_id();
        leptos::task::spawn(async move {
            // Aborting drops fut, and with it anything it was still waiting on:
            if Abortable::new(fut, registration).await.is_err() {
                tracing::trace!(subscription_id = id, "subscription aborted");
            }
        });
        Self { id, abort_handle }
    }

    /// Process-unique id, for logs.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True once unsubscribed.
    pub fn is_closed(&self) -> bool {
        self.abort_handle.is_aborted()
    }

    /// Cancel the pipeline. In-flight work is dropped the next time the executor polls it.
    pub fn unsubscribe(self) {
        tracing::trace!(subscription_id = self.id, "unsubscribing");
        self.abort_handle.abort();
    }
}
