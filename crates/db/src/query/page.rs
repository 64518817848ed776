//! Windowing over an already-filtered result set
//!
//! Pagination is kept separate from filtering so the two kinds of
//! state can never entangle: a page is just a view over whatever
//! vector the filter stage produced.

/// One page of results plus the size of the whole result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The records visible on this page
    pub visible: Vec<T>,
    /// Total number of records across all pages
    pub total_count: usize,
}

impl<T> Page<T> {
    /// Number of pages needed to show `total_count` records
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(page_size)
    }
}

/// Take the 1-based `page` of size `page_size` from `items`.
///
/// A page past the end of the data yields an empty visible set with
/// the true total count; the requested page number is never clamped.
/// Page 0 reads as page 1. A zero page size yields nothing. The input
/// slice is untouched.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let total_count = items.len();
    if page_size == 0 {
        return Page {
            visible: Vec::new(),
            total_count,
        };
    }

    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= total_count {
        return Page {
            visible: Vec::new(),
            total_count,
        };
    }

    let end = start.saturating_add(page_size).min(total_count);
    Page {
        visible: items[start..end].to_vec(),
        total_count,
    }
}
