use futures::{
    Stream, StreamExt,
    stream::{self, BoxStream},
};
use serde::{Deserialize, Serialize};

use crate::{
    Community, FetchError, PageInfo, PaginatedList, RemoteData, SortDirection, SortOptions,
};

/// The `dc.title` metadata field, what top-level communities are sorted by by default.
pub const TITLE_SORT_FIELD: &str = "dc.title";

/// One page's worth of top-level communities, in whatever state the fetch is in.
pub type CommunityPage = RemoteData<PaginatedList<Community>>;

/// What page to find, and how to sort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindListOptions {
    /// The page to find, starting from 1.
    pub current_page: usize,
    /// Maximum items on the page.
    pub elements_per_page: usize,
    /// How to sort across all pages.
    pub sort: SortOptions,
}

impl FindListOptions {
    /// Create new [`FindListOptions`].
    pub fn new(current_page: usize, elements_per_page: usize, sort: SortOptions) -> Self {
        Self {
            current_page,
            elements_per_page,
            sort,
        }
    }

    /// Zero-based offset of the first item on the page, `None` if the page is too far out to address.
    pub fn offset(&self) -> Option<usize> {
        self.current_page
            .saturating_sub(1)
            .checked_mul(self.elements_per_page)
    }
}

/// Where top-level communities come from.
///
/// Each call to [`CommunityDataService::find_top`] is a new request, its stream yields the
/// request's state as it progresses. Dropping the stream means the caller has lost interest.
///
/// Implemented for closures of the form `Fn(FindListOptions) -> impl Stream<Item = CommunityPage>`.
pub trait CommunityDataService: Send + Sync + 'static {
    /// Find a page of top-level communities.
    fn find_top(&self, options: FindListOptions) -> BoxStream<'static, CommunityPage>;
}

impl<F, S> CommunityDataService for F
where
    F: Fn(FindListOptions) -> S + Send + Sync + 'static,
    S: Stream<Item = CommunityPage> + Send + 'static,
{
    fn find_top(&self, options: FindListOptions) -> BoxStream<'static, CommunityPage> {
        self(options).boxed()
    }
}

/// A [`CommunityDataService`] over a fixed set of communities. Only sorts by [`TITLE_SORT_FIELD`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommunityService {
    communities: Vec<Community>,
}

impl InMemoryCommunityService {
    /// Create a new [`InMemoryCommunityService`].
    pub fn new(communities: Vec<Community>) -> Self {
        Self { communities }
    }

    fn page(&self, options: &FindListOptions) -> Result<PaginatedList<Community>, FetchError> {
        if options.sort.field != TITLE_SORT_FIELD {
            return Err(FetchError::new(
                Some(400),
                format!("cannot sort communities by {}", options.sort.field),
            ));
        }
        if options.current_page == 0 || options.elements_per_page == 0 {
            return Err(FetchError::new(
                Some(400),
                "page and page size must be at least 1",
            ));
        }
        let Some(offset) = options.offset() else {
            return Err(FetchError::new(
                Some(400),
                format!("page {} is out of range", options.current_page),
            ));
        };

        let mut sorted = self.communities.clone();
        sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        if options.sort.direction == SortDirection::Desc {
            sorted.reverse();
        }

        let total_elements = sorted.len();
        let page = sorted
            .into_iter()
            .skip(offset)
            .take(options.elements_per_page)
            .collect();
        Ok(PaginatedList::new(
            PageInfo::new(options.elements_per_page, total_elements, options.current_page),
            page,
        ))
    }
}

impl CommunityDataService for InMemoryCommunityService {
    fn find_top(&self, options: FindListOptions) -> BoxStream<'static, CommunityPage> {
        let result = self.page(&options);
        stream::iter([RemoteData::Loading, RemoteData::from(result)]).boxed()
    }
}
