//! Page slicing and page-number bookkeeping
//!
//! Passing `None` for the pagination means the host opted out: every row is
//! visible.

use tracing::{debug, warn};

use crate::error::{Result, ViewError};
use crate::state::view_state::Pagination;

/// Number of pages for `total_items`. An empty dataset still has one page.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// `(start, end_exclusive)` of the current page, clamped to `[0, row_count]`
pub fn visible_range(pagination: Option<&Pagination>, row_count: usize) -> (usize, usize) {
    let Some(pagination) = pagination else {
        return (0, row_count);
    };

    let start = pagination
        .page
        .saturating_sub(1)
        .saturating_mul(pagination.page_size);
    let end = pagination.page.saturating_mul(pagination.page_size);
    (start.min(row_count), end.min(row_count))
}

/// Rows of the current page. A page past the end yields an empty slice.
pub fn slice<'a, T>(rows: &'a [T], pagination: Option<&Pagination>) -> &'a [T] {
    let (start, end) = visible_range(pagination, rows.len());
    &rows[start..end]
}

/// Check a page number against the page count
pub fn check_page(page: usize, total_items: usize, page_size: usize) -> Result<()> {
    let last_page = page_count(total_items, page_size);
    if page == 0 || page > last_page {
        return Err(ViewError::InvalidPage { page, last_page });
    }
    Ok(())
}

/// Record a new total and pull the page back into range.
///
/// An out-of-range page is recovered by clamping to the nearest valid page.
pub fn clamp_page(pagination: &Pagination, total_items: usize) -> Pagination {
    let mut next = pagination.clone();
    next.total_items = total_items;

    if let Err(err) = check_page(next.page, total_items, next.page_size) {
        let last_page = page_count(total_items, next.page_size);
        let clamped = next.page.clamp(1, last_page);
        warn!(target: "pagination", "{}; clamping to page {}", err, clamped);
        next.page = clamped;
    }
    next
}

/// Apply a page change request, then clamp against the current total
pub fn change_page(pagination: &Pagination, page: usize, page_size: usize) -> Result<Pagination> {
    if page_size == 0 {
        return Err(ViewError::InvalidPageSize { page_size });
    }
    if !pagination.page_sizes.contains(&page_size) {
        debug!(
            target: "pagination",
            "Page size {} is not one of the offered sizes {:?}",
            page_size, pagination.page_sizes
        );
    }

    let mut next = pagination.clone();
    next.page = page;
    next.page_size = page_size;
    debug!(target: "pagination", "Page change to {} (size {})", page, page_size);
    Ok(clamp_page(&next, next.total_items))
}

/// Back to the first page
pub fn reset_page(pagination: &Pagination) -> Pagination {
    Pagination {
        page: 1,
        ..pagination.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: usize, page_size: usize, total_items: usize) -> Pagination {
        Pagination {
            page,
            page_size,
            page_sizes: vec![10, 20, 30],
            total_items,
        }
    }

    #[test]
    fn test_visible_range_middle_and_last_page() {
        assert_eq!(visible_range(Some(&pagination(2, 10, 25)), 25), (10, 20));
        assert_eq!(visible_range(Some(&pagination(3, 10, 25)), 25), (20, 25));
    }

    #[test]
    fn test_disabled_pagination_shows_everything() {
        assert_eq!(visible_range(None, 42), (0, 42));
        let rows: Vec<u32> = (0..42).collect();
        assert_eq!(slice(&rows, None).len(), 42);
    }

    #[test]
    fn test_page_past_end_is_empty_not_error() {
        let rows: Vec<u32> = (0..5).collect();
        assert!(slice(&rows, Some(&pagination(4, 10, 5))).is_empty());
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let next = clamp_page(&pagination(5, 10, 50), 12);
        assert_eq!(next.page, 2);
        assert_eq!(next.total_items, 12);

        let next = clamp_page(&pagination(5, 10, 50), 0);
        assert_eq!(next.page, 1);
    }

    #[test]
    fn test_check_page_reports_last_page() {
        assert_eq!(
            check_page(3, 15, 10),
            Err(ViewError::InvalidPage {
                page: 3,
                last_page: 2
            })
        );
        assert!(check_page(0, 15, 10).is_err());
        assert!(check_page(2, 15, 10).is_ok());
    }

    #[test]
    fn test_change_page() {
        let next = change_page(&pagination(1, 10, 45), 3, 20).unwrap();
        assert_eq!((next.page, next.page_size), (3, 20));

        let next = change_page(&pagination(1, 10, 45), 9, 10).unwrap();
        assert_eq!(next.page, 5);

        assert_eq!(
            change_page(&pagination(1, 10, 45), 1, 0),
            Err(ViewError::InvalidPageSize { page_size: 0 })
        );
    }

    #[test]
    fn test_reset_page() {
        assert_eq!(reset_page(&pagination(4, 10, 45)).page, 1);
    }
}
