use serde::{Deserialize, Serialize};

/// Paging metadata for a [`PaginatedList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The requested page size.
    pub elements_per_page: usize,
    /// Items across all pages.
    pub total_elements: usize,
    /// Number of pages, 0 when there are no items.
    pub total_pages: usize,
    /// The page this list holds, starting from 1.
    pub current_page: usize,
}

impl PageInfo {
    /// Create new [`PageInfo`], deriving `total_pages`.
    pub fn new(elements_per_page: usize, total_elements: usize, current_page: usize) -> Self {
        let total_pages = if elements_per_page == 0 {
            0
        } else {
            total_elements.div_ceil(elements_per_page)
        };
        Self {
            elements_per_page,
            total_elements,
            total_pages,
            current_page,
        }
    }
}

/// One page of items plus its [`PageInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedList<T> {
    /// Paging metadata.
    pub page_info: PageInfo,
    /// The items on this page.
    pub page: Vec<T>,
}

impl<T> PaginatedList<T> {
    /// Create a new [`PaginatedList`].
    pub fn new(page_info: PageInfo, page: Vec<T>) -> Self {
        Self { page_info, page }
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.page.len()
    }

    /// True if this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.page.is_empty()
    }

    /// Iterate the items on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.page.iter()
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case(5, 0, 0)]
    #[case(5, 5, 1)]
    #[case(5, 6, 2)]
    #[case(10, 95, 10)]
    #[case(0, 10, 0)]
    fn test_total_pages(#[case] per_page: usize, #[case] total: usize, #[case] expected: usize) {
        assert_eq!(PageInfo::new(per_page, total, 1).total_pages, expected);
    }
}
