use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 8] = [1, 5, 10, 20, 40, 60, 80, 100];
pub(crate) const DEFAULT_MAX_SIZE: usize = 10;

/// Pagination settings for a paginated list, keyed by `id` in the [`crate::PaginationService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationComponentOptions {
    /// Key shared with the [`crate::PaginationService`].
    pub id: String,
    /// Maximum items per page, at least 1.
    pub page_size: usize,
    /// The active page, starting from 1.
    pub current_page: usize,
    /// Page sizes a pager lets the user pick from.
    pub page_size_options: Vec<usize>,
    /// How many page links a pager shows at once.
    pub max_size: usize,
}

impl PaginationComponentOptions {
    /// Create new options on the first page.
    pub fn new(id: impl Into<String>, page_size: usize) -> Self {
        Self {
            id: id.into(),
            page_size,
            current_page: 1,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    /// Start on a different page.
    pub fn with_current_page(mut self, current_page: usize) -> Self {
        self.current_page = current_page;
        self
    }
}
