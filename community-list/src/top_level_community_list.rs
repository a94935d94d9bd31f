use std::sync::Arc;

use futures::StreamExt;
use leptos::prelude::{ArcReadSignal, ArcRwSignal, Set};
use parking_lot::Mutex;

use crate::{
    AppConfig, CommunityDataService, CommunityPage, FindListOptions, PaginationComponentOptions,
    PaginationService, SortDirection, SortOptions, Subscription, TITLE_SORT_FIELD,
    stream_ext::{SwitchMapExt, combine_latest},
};

/// The id the top-level community list shares its pagination state under.
pub const TOP_LEVEL_PAGINATION_ID: &str = "tl";

/// Where a [`TopLevelCommunityList`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, [`TopLevelCommunityList::start`] not yet called.
    Uninitialized,
    /// Fetching whenever the pagination or sort changes.
    Active,
    /// Stopped, for good.
    Terminated,
}

#[derive(Debug)]
enum Lifecycle {
    Uninitialized,
    Active(Subscription),
    Terminated,
}

/// The paginated list of top-level communities on the home page.
///
/// Between [`TopLevelCommunityList::start`] and [`TopLevelCommunityList::stop`], every change to
/// the pagination or sort shared under [`TOP_LEVEL_PAGINATION_ID`] issues a new
/// [`CommunityDataService::find_top`]. Only the most recent request is listened to, so a slow
/// response for a page the user already moved away from never reaches
/// [`TopLevelCommunityList::communities`].
pub struct TopLevelCommunityList<D>
where
    D: CommunityDataService,
{
    config: PaginationComponentOptions,
    sort_config: SortOptions,
    communities: ArcRwSignal<CommunityPage>,
    data_service: Arc<D>,
    pagination_service: PaginationService,
    lifecycle: Mutex<Lifecycle>,
}

impl<D> TopLevelCommunityList<D>
where
    D: CommunityDataService,
{
    /// Create the list, on page 1 sorted by title, with the page size from `app_config`.
    ///
    /// Nothing is fetched until [`TopLevelCommunityList::start`].
    pub fn new(
        app_config: &AppConfig,
        data_service: Arc<D>,
        pagination_service: PaginationService,
    ) -> Self {
        let config = PaginationComponentOptions::new(
            TOP_LEVEL_PAGINATION_ID,
            app_config.home_page.top_level_community_list.page_size,
        );
        let sort_config = SortOptions::new(TITLE_SORT_FIELD, SortDirection::Asc);
        Self {
            config,
            sort_config,
            communities: ArcRwSignal::new(CommunityPage::Unloaded),
            data_service,
            pagination_service,
            lifecycle: Mutex::new(Lifecycle::Uninitialized),
        }
    }

    /// The latest state of the current page.
    ///
    /// [`crate::RemoteData::Unloaded`] until the first response arrives.
    pub fn communities(&self) -> ArcReadSignal<CommunityPage> {
        self.communities.read_only()
    }

    /// The pagination defaults, for rendering the pager.
    pub fn config(&self) -> &PaginationComponentOptions {
        &self.config
    }

    /// The sort defaults.
    pub fn sort_config(&self) -> &SortOptions {
        &self.sort_config
    }

    /// The id pagination state is shared under.
    pub fn pagination_id(&self) -> &str {
        &self.config.id
    }

    /// Where the list is in its lifecycle.
    pub fn state(&self) -> LifecycleState {
        match &*self.lifecycle.lock() {
            Lifecycle::Uninitialized => LifecycleState::Uninitialized,
            Lifecycle::Active(_) => LifecycleState::Active,
            Lifecycle::Terminated => LifecycleState::Terminated,
        }
    }

    /// True between [`TopLevelCommunityList::start`] and [`TopLevelCommunityList::stop`].
    pub fn is_active(&self) -> bool {
        self.state() == LifecycleState::Active
    }

    /// Start fetching, and keep refetching whenever the pagination or sort changes.
    ///
    /// Calling again while active replaces the running pipeline. Does nothing once stopped.
    pub fn start(&self) {
        let mut lifecycle = self.lifecycle.lock();
        match std::mem::replace(&mut *lifecycle, Lifecycle::Terminated) {
            Lifecycle::Terminated => {
                tracing::warn!(
                    id = %self.config.id,
                    "top-level community list already stopped, not restarting"
                );
                return;
            }
            Lifecycle::Active(previous) => previous.unsubscribe(),
            Lifecycle::Uninitialized => {}
        }

        let pagination = self
            .pagination_service
            .current_pagination(&self.config.id, &self.config);
        let sort = self
            .pagination_service
            .current_sort(&self.config.id, &self.sort_config);

        let data_service = self.data_service.clone();
        let mut results = combine_latest(pagination, sort).switch_map(move |(pagination, sort)| {
            let options = FindListOptions::new(pagination.current_page, pagination.page_size, sort);
            tracing::debug!(?options, "finding top-level communities");
            data_service.find_top(options)
        });

        let communities = self.communities.clone();
        let subscription = Subscription::spawn(async move {
            while let Some(result) = results.next().await {
                communities.set(result);
            }
        });
        tracing::debug!(
            id = %self.config.id,
            subscription_id = subscription.id(),
            "top-level community list started"
        );
        *lifecycle = Lifecycle::Active(subscription);
    }

    /// Stop fetching and release the shared pagination state. Only the first call has any effect.
    pub fn stop(&self) {
        let previous = std::mem::replace(&mut *self.lifecycle.lock(), Lifecycle::Terminated);
        match previous {
            Lifecycle::Terminated => return,
            Lifecycle::Active(subscription) => subscription.unsubscribe(),
            Lifecycle::Uninitialized => {}
        }
        self.pagination_service.clear_pagination(&self.config.id);
        tracing::debug!(id = %self.config.id, "top-level community list stopped");
    }
}

impl<D> Drop for TopLevelCommunityList<D>
where
    D: CommunityDataService,
{
    fn drop(&mut self) {
        self.stop();
    }
}
