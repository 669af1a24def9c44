//! Pagination types for list screens.
//!
//! [`PageRequest`] is what a list screen asks the backend for,
//! [`Pagination`] is what the backend reports back, and [`PageWindow`] is
//! the bounded row of page buttons shown to the user.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size accepted by the backend.
const MAX_PAGE_SIZE: u64 = 100;
/// Default number of page buttons around the current page.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size", rename = "limit")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping both values into range.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination block returned by the backend's list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-based).
    #[serde(default = "default_page")]
    pub current_page: u64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u64,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total_count: u64,
    /// Whether there is a next page.
    #[serde(default)]
    pub has_next: bool,
    /// Whether there is a previous page.
    #[serde(default)]
    pub has_prev: bool,
}

impl Pagination {
    /// Derive a pagination block from a page request and an item count.
    pub fn from_count(request: &PageRequest, total_count: u64) -> Self {
        let total_pages = total_count.div_ceil(request.page_size.max(1));
        Self {
            current_page: request.page,
            total_pages,
            total_count,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }

    /// Compute the page-button window for this page.
    pub fn window(&self, max_visible: usize) -> PageWindow {
        PageWindow::new(self.current_page, self.total_pages, max_visible)
    }
}

/// One entry in a page-button row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageMarker {
    /// A clickable page number.
    Page(u64),
    /// A gap of two or more hidden pages.
    Ellipsis,
}

/// The bounded, ellipsis-annotated set of page buttons for a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Ordered page markers.
    pub pages: Vec<PageMarker>,
    /// The page the window is centered on, clamped into range.
    pub current_page: u64,
}

impl PageWindow {
    /// Build the window for `current` out of `total` pages.
    pub fn new(current: u64, total: u64, max_visible: usize) -> Self {
        Self {
            pages: compute_window(current, total, max_visible),
            current_page: current.clamp(1, total.max(1)),
        }
    }

    /// Whether the list has more than one page worth showing controls for.
    pub fn is_paged(&self) -> bool {
        self.pages.len() > 1
    }
}

/// Compute the page buttons for `current` out of `total` pages.
///
/// At most `max_visible` consecutive pages are shown, centered on
/// `current` and shifted to stay inside `[1, total]`. Page 1 and page
/// `total` are always present; an [`PageMarker::Ellipsis`] marks every gap
/// of more than one page between an anchor and the window.
pub fn compute_window(current: u64, total: u64, max_visible: usize) -> Vec<PageMarker> {
    if total == 0 {
        return Vec::new();
    }

    let visible = (max_visible.max(1) as u64).min(total);
    let current = current.clamp(1, total);

    // Shift left so the window ends at or before `total`.
    let start = current
        .saturating_sub(visible / 2)
        .max(1)
        .min(total - visible + 1);
    let end = start + (visible - 1);

    let mut pages = Vec::with_capacity(visible as usize + 4);
    if start > 1 {
        pages.push(PageMarker::Page(1));
        if start > 2 {
            pages.push(PageMarker::Ellipsis);
        }
    }
    pages.extend((start..=end).map(PageMarker::Page));
    if end < total {
        if end < total - 1 {
            pages.push(PageMarker::Ellipsis);
        }
        pages.push(PageMarker::Page(total));
    }
    pages
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::PageMarker::{Ellipsis, Page};
    use super::*;

    fn pages(range: std::ops::RangeInclusive<u64>) -> Vec<PageMarker> {
        range.map(Page).collect()
    }

    #[test]
    fn test_middle_of_long_list() {
        assert_eq!(
            compute_window(7, 10, 5),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            compute_window(5, 10, 5),
            vec![
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_short_list_has_no_ellipsis() {
        assert_eq!(compute_window(2, 4, 5), pages(1..=4));
        assert_eq!(compute_window(3, 5, 5), pages(1..=5));
    }

    #[test]
    fn test_edges() {
        assert_eq!(
            compute_window(1, 10, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(
            compute_window(10, 10, 5),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(compute_window(1, 1, 5), vec![Page(1)]);
        assert!(compute_window(1, 0, 5).is_empty());
    }

    #[test]
    fn test_window_touching_anchor_has_no_ellipsis() {
        // start == 2: page 1 is adjacent, no gap marker.
        assert_eq!(
            compute_window(4, 10, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_current_always_present() {
        for total in 1..=25u64 {
            for max_visible in 1..=7usize {
                for current in 1..=total {
                    let window = compute_window(current, total, max_visible);
                    assert!(
                        window.contains(&Page(current)),
                        "current={current} total={total} max={max_visible}"
                    );
                    assert_eq!(window.first(), Some(&Page(1)));
                    assert_eq!(window.last(), Some(&Page(total)));
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        let window = PageWindow::new(40, 10, 5);
        assert_eq!(window.current_page, 10);
        assert!(window.pages.contains(&Page(10)));
        assert_eq!(compute_window(0, 3, 5), pages(1..=3));
    }

    #[test]
    fn test_huge_page_counts() {
        let max = u64::MAX;
        assert_eq!(
            compute_window(max, max, 5),
            vec![
                Page(1),
                Ellipsis,
                Page(max - 4),
                Page(max - 3),
                Page(max - 2),
                Page(max - 1),
                Page(max)
            ]
        );
        assert_eq!(
            compute_window(max - 1, max, 3),
            vec![Page(1), Ellipsis, Page(max - 2), Page(max - 1), Page(max)]
        );

        let p: Pagination = serde_json::from_str(
            r#"{"currentPage":18446744073709551615,"totalPages":18446744073709551615}"#,
        )
        .unwrap();
        let window = p.window(5);
        assert_eq!(window.current_page, max);
        assert_eq!(window.pages.last(), Some(&Page(max)));
        assert_eq!(window.pages.len(), 7);
    }

    #[test]
    fn test_pagination_from_count() {
        let p = Pagination::from_count(&PageRequest::new(2, 10), 45);
        assert_eq!(p.total_pages, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert!(p.window(5).is_paged());
    }

    #[test]
    fn test_pagination_deserializes_backend_shape() {
        let p: Pagination = serde_json::from_str(
            r#"{"currentPage":3,"totalPages":9,"totalCount":87,"hasNext":true,"hasPrev":true}"#,
        )
        .unwrap();
        assert_eq!(p.current_page, 3);
        assert_eq!(p.total_count, 87);
    }
}
