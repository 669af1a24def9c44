//! One page of a paged list, ready to display.

use serde::Serialize;

use pdfvault_core::types::{PageWindow, Pagination};

/// Items of one page plus the page buttons to show under them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Backend page bookkeeping.
    pub pagination: Pagination,
    /// Page buttons.
    pub window: PageWindow,
}

impl<T> ListPage<T> {
    /// Combine a backend page with its page-button window.
    pub fn new(items: Vec<T>, pagination: Pagination, max_visible: usize) -> Self {
        let window = pagination.window(max_visible);
        Self {
            items,
            pagination,
            window,
        }
    }

    /// Whether the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pdfvault_core::types::PageMarker;

    use super::*;

    #[test]
    fn test_window_follows_pagination() {
        let pagination = Pagination {
            current_page: 7,
            total_pages: 10,
            total_count: 95,
            has_next: true,
            has_prev: true,
        };
        let page = ListPage::new(vec!["x"], pagination, 5);
        assert_eq!(page.window.current_page, 7);
        assert!(page.window.pages.contains(&PageMarker::Page(7)));
        assert_eq!(page.window.pages.first(), Some(&PageMarker::Page(1)));
        assert_eq!(page.window.pages.last(), Some(&PageMarker::Page(10)));
    }
}
