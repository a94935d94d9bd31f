use std::{
    collections::HashMap,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures::{Stream, StreamExt, channel::mpsc};
use parking_lot::Mutex;

use crate::{
    PaginationComponentOptions, SortDirection, SortOptions, utils::new_subscriber_id,
};

type States = Arc<Mutex<HashMap<String, KeyedState>>>;

/// A live stream of the current value of some pagination state.
///
/// Yields the current value straight away, then every distinct change.
/// Dropping it unregisters it from the [`PaginationService`].
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct StateStream<T> {
    rx: mpsc::UnboundedReceiver<T>,
    _guard: SubscriberDropGuard,
}

impl<T> Stream for StateStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_next_unpin(cx)
    }
}

/// Removes the subscriber when its stream is dropped, and the id too once nothing else holds it.
#[derive(Debug)]
struct SubscriberDropGuard {
    states: States,
    id: String,
    subscriber_id: u64,
}

impl Drop for SubscriberDropGuard {
    fn drop(&mut self) {
        let mut states = self.states.lock();
        if let Some(state) = states.get_mut(&self.id) {
            state.pagination_subs.retain(|sub| sub.id != self.subscriber_id);
            state.sort_subs.retain(|sub| sub.id != self.subscriber_id);
            if state.is_idle() {
                states.remove(&self.id);
            }
        }
    }
}

/// Rejected [`PaginationChange`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Pages start from 1.
    #[error("page must be at least 1")]
    InvalidPage,
    /// A page must hold at least 1 item.
    #[error("page size must be at least 1")]
    InvalidPageSize,
}

/// A partial update to the shared pagination state of an id. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationChange {
    /// The active page.
    pub page: Option<usize>,
    /// Items per page.
    pub page_size: Option<usize>,
    /// Field to sort by.
    pub sort_field: Option<String>,
    /// Direction to sort in.
    pub sort_direction: Option<SortDirection>,
}

impl PaginationChange {
    /// An empty change.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the active page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    /// Change the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Change the sort field.
    pub fn with_sort_field(mut self, sort_field: impl Into<String>) -> Self {
        self.sort_field = Some(sort_field.into());
        self
    }

    /// Change the sort direction.
    pub fn with_sort_direction(mut self, sort_direction: SortDirection) -> Self {
        self.sort_direction = Some(sort_direction);
        self
    }

    fn validate(&self) -> Result<(), PaginationError> {
        if self.page == Some(0) {
            return Err(PaginationError::InvalidPage);
        }
        if self.page_size == Some(0) {
            return Err(PaginationError::InvalidPageSize);
        }
        Ok(())
    }

    fn merge(&mut self, other: PaginationChange) {
        if other.page.is_some() {
            self.page = other.page;
        }
        if other.page_size.is_some() {
            self.page_size = other.page_size;
        }
        if other.sort_field.is_some() {
            self.sort_field = other.sort_field;
        }
        if other.sort_direction.is_some() {
            self.sort_direction = other.sort_direction;
        }
    }
}

/// State that a subscriber's defaults can be overlaid with the shared state of its id.
trait Overlay: Clone + PartialEq {
    fn overlay(defaults: &Self, shared: &PaginationChange) -> Self;
}

impl Overlay for PaginationComponentOptions {
    fn overlay(defaults: &Self, shared: &PaginationChange) -> Self {
        let mut value = defaults.clone();
        if let Some(page) = shared.page {
            value.current_page = page;
        }
        if let Some(page_size) = shared.page_size {
            value.page_size = page_size;
        }
        value
    }
}

impl Overlay for SortOptions {
    fn overlay(defaults: &Self, shared: &PaginationChange) -> Self {
        let mut value = defaults.clone();
        if let Some(field) = &shared.sort_field {
            value.field = field.clone();
        }
        if let Some(direction) = shared.sort_direction {
            value.direction = direction;
        }
        value
    }
}

#[derive(Debug)]
struct Subscriber<T> {
    id: u64,
    defaults: T,
    last_sent: T,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Overlay> Subscriber<T> {
    /// Returns false once the receiving end is gone and the subscriber should be removed.
    fn notify(&mut self, shared: &PaginationChange) -> bool {
        if self.tx.is_closed() {
            tracing::trace!(subscriber_id = self.id, "dropping closed pagination subscriber");
            return false;
        }
        let next = T::overlay(&self.defaults, shared);
        // Don't want to re-emit if not changing:
        if next != self.last_sent {
            if self.tx.unbounded_send(next.clone()).is_err() {
                return false;
            }
            self.last_sent = next;
        }
        true
    }

    fn is_live(&self) -> bool {
        !self.tx.is_closed()
    }
}

#[derive(Debug, Default)]
struct KeyedState {
    // None until something writes to the id, and again after it's cleared.
    shared: Option<PaginationChange>,
    pagination_subs: Vec<Subscriber<PaginationComponentOptions>>,
    sort_subs: Vec<Subscriber<SortOptions>>,
}

impl KeyedState {
    fn notify_all(&mut self) {
        let shared = self.shared.clone().unwrap_or_default();
        self.pagination_subs.retain_mut(|sub| sub.notify(&shared));
        self.sort_subs.retain_mut(|sub| sub.notify(&shared));
    }

    fn live_subscribers(&self) -> usize {
        self.pagination_subs.iter().filter(|sub| sub.is_live()).count()
            + self.sort_subs.iter().filter(|sub| sub.is_live()).count()
    }

    fn prune_closed(&mut self) {
        self.pagination_subs.retain(Subscriber::is_live);
        self.sort_subs.retain(Subscriber::is_live);
    }

    fn is_idle(&self) -> bool {
        self.shared.is_none() && self.live_subscribers() == 0
    }
}

/// Pagination and sort state shared between list components by id.
///
/// A component reads its state through [`PaginationService::current_pagination`] and
/// [`PaginationService::current_sort`], each overlaying the component's own defaults with
/// whatever has been written to the id. Defaults are never written into the shared state, so a
/// new subscriber can't clobber state another component already set up.
///
/// Cheap to clone, clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct PaginationService {
    states: States,
}

impl PaginationService {
    /// Create a new, empty [`PaginationService`].
    pub fn new() -> Self {
        Self::default()
    }

    /// A live stream of the pagination of `id`, starting from `defaults` where nothing has been written.
    pub fn current_pagination(
        &self,
        id: &str,
        defaults: &PaginationComponentOptions,
    ) -> StateStream<PaginationComponentOptions> {
        self.subscribe(id, defaults, |state| &mut state.pagination_subs)
    }

    /// A live stream of the sort of `id`, starting from `defaults` where nothing has been written.
    pub fn current_sort(&self, id: &str, defaults: &SortOptions) -> StateStream<SortOptions> {
        self.subscribe(id, defaults, |state| &mut state.sort_subs)
    }

    fn subscribe<T: Overlay>(
        &self,
        id: &str,
        defaults: &T,
        subs: impl FnOnce(&mut KeyedState) -> &mut Vec<Subscriber<T>>,
    ) -> StateStream<T> {
        let mut states = self.states.lock();
        let state = states.entry(id.to_string()).or_default();
        let current = T::overlay(defaults, &state.shared.clone().unwrap_or_default());
        let (tx, rx) = mpsc::unbounded();
        // Can't fail, rx is still alive:
        let _ = tx.unbounded_send(current.clone());
        let sub_id = new_subscriber_id();
        tracing::trace!(id, subscriber_id = sub_id, "new pagination subscriber");
        subs(state).push(Subscriber {
            id: sub_id,
            defaults: defaults.clone(),
            last_sent: current,
            tx,
        });
        StateStream {
            rx,
            _guard: SubscriberDropGuard {
                states: self.states.clone(),
                id: id.to_string(),
                subscriber_id: sub_id,
            },
        }
    }

    /// Write a change to the shared state of `id`, notifying every subscriber whose value changes.
    pub fn update_route(&self, id: &str, change: PaginationChange) -> Result<(), PaginationError> {
        change.validate()?;
        tracing::debug!(id, ?change, "updating pagination");
        let mut states = self.states.lock();
        let state = states.entry(id.to_string()).or_default();
        state.shared.get_or_insert_with(Default::default).merge(change);
        state.notify_all();
        Ok(())
    }

    /// Go back to the first page of `id`, e.g. after a filter changed.
    pub fn reset_page(&self, id: &str) {
        let mut states = self.states.lock();
        let state = states.entry(id.to_string()).or_default();
        state
            .shared
            .get_or_insert_with(Default::default)
            .merge(PaginationChange::new().with_page(1));
        state.notify_all();
    }

    /// Release the shared state of `id`.
    ///
    /// Subscribers still attached fall back to their own defaults.
    pub fn clear_pagination(&self, id: &str) {
        let mut states = self.states.lock();
        let remove = if let Some(state) = states.get_mut(id) {
            tracing::debug!(id, "clearing pagination");
            state.shared = None;
            state.prune_closed();
            state.notify_all();
            state.is_idle()
        } else {
            false
        };
        if remove {
            states.remove(id);
        }
    }

    /// True if anything has been written to `id` since it was last cleared.
    pub fn has_state(&self, id: &str) -> bool {
        self.states
            .lock()
            .get(id)
            .map(|state| state.shared.is_some())
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub(crate) fn is_tracked(&self, id: &str) -> bool {
        self.states.lock().contains_key(id)
    }

    /// The number of live pagination and sort streams on `id`.
    pub fn subscriber_count(&self, id: &str) -> usize {
        self.states
            .lock()
            .get(id)
            .map(|state| state.live_subscribers())
            .unwrap_or(0)
    }
}
