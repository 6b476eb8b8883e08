//! Fixed-size pagination with clamped page numbers

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

/// Page size used by the dashboard tables
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Number of page buttons shown before windowing kicks in
pub const DEFAULT_PAGE_WINDOW: usize = 5;

/// One page of an ordered collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<T> {
    /// Items on this page, in collection order
    pub items: Vec<T>,
    /// 1-indexed page number, always within `1..=total_pages`
    pub page_number: usize,
    /// Fixed page size
    pub page_size: usize,
    /// Size of the whole collection
    pub total_items: usize,
    /// Page count, at least 1 even for an empty collection
    pub total_pages: usize,
}

impl<T> PageView<T> {
    /// Check if there is a next page
    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Check if there is a previous page
    pub fn has_prev_page(&self) -> bool {
        self.page_number > 1
    }

    /// 1-indexed position of the first item on this page, 0 when empty
    pub fn first_item_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page_number - 1) * self.page_size + 1
        }
    }

    /// 1-indexed position of the last item on this page, 0 when empty
    pub fn last_item_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_item_index() + self.items.len() - 1
        }
    }
}

/// Page count for a collection: `max(1, ceil(total_items / page_size))`
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Clamp a requested page into `1..=total_pages`
pub fn clamp_page(requested_page: usize, total_pages: usize) -> usize {
    requested_page.clamp(1, total_pages.max(1))
}

/// Slices ordered collections into fixed-size pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    /// Create a paginator; a zero page size is rejected
    pub fn new(page_size: usize) -> AuditResult<Self> {
        if page_size == 0 {
            return Err(AuditError::InvalidPageSize(page_size));
        }
        Ok(Self { page_size })
    }

    /// Configured page size
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page count for `total_items`
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_pages(total_items, self.page_size)
    }

    /// Build the page for `requested_page`.
    ///
    /// Out-of-range requests clamp to the nearest valid page instead of failing.
    pub fn paginate<T: Clone>(&self, items: &[T], requested_page: usize) -> PageView<T> {
        let total_items = items.len();
        let total_pages = self.total_pages(total_items);
        let page_number = clamp_page(requested_page, total_pages);

        let start = (page_number - 1) * self.page_size;
        let end = std::cmp::min(start + self.page_size, total_items);
        let page_items = if start < total_items {
            items[start..end].to_vec()
        } else {
            Vec::new()
        };

        PageView {
            items: page_items,
            page_number,
            page_size: self.page_size,
            total_items,
            total_pages,
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Current page of a paginated control.
///
/// Call [`PageCursor::sync`] whenever the underlying collection changes so a
/// shrinking result set pulls the cursor back onto its last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    page: usize,
}

impl PageCursor {
    /// Cursor on page 1
    pub fn new() -> Self {
        Self { page: 1 }
    }

    /// Cursor on `page`, not yet clamped
    pub fn at(page: usize) -> Self {
        Self { page }
    }

    /// Current page
    pub fn current(&self) -> usize {
        self.page
    }

    /// Re-clamp against the current page count and return the result
    pub fn sync(&mut self, total_pages: usize) -> usize {
        self.page = clamp_page(self.page, total_pages);
        self.page
    }

    /// Jump to `page`, clamped
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> usize {
        self.page = clamp_page(page, total_pages);
        self.page
    }

    /// Advance one page, stopping at the last
    pub fn next(&mut self, total_pages: usize) -> usize {
        self.go_to(self.page.saturating_add(1), total_pages)
    }

    /// Go back one page, stopping at the first
    pub fn prev(&mut self, total_pages: usize) -> usize {
        self.go_to(self.page.saturating_sub(1), total_pages)
    }

    /// Back to page 1
    pub fn reset(&mut self) {
        self.page = 1;
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry in a page-number control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMarker {
    /// A clickable page number
    Page(usize),
    /// A gap of one or more hidden pages
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{}", n),
            PageMarker::Ellipsis => write!(f, "…"),
        }
    }
}

/// Page numbers to show in a pagination control.
///
/// Up to `window` pages are all listed. Beyond that the first page, the last
/// page and `current ± 1` are listed, with an ellipsis for every gap.
pub fn visible_page_numbers(current: usize, total: usize, window: usize) -> Vec<PageMarker> {
    let total = total.max(1);
    let current = clamp_page(current, total);

    if total <= window {
        return (1..=total).map(PageMarker::Page).collect();
    }

    let mut pages = BTreeSet::from([1, total, current]);
    if current > 1 {
        pages.insert(current - 1);
    }
    if current < total {
        pages.insert(current + 1);
    }

    let mut markers = Vec::with_capacity(pages.len() * 2);
    let mut previous = 0;
    for page in pages {
        if previous != 0 && page > previous + 1 {
            markers.push(PageMarker::Ellipsis);
        }
        markers.push(PageMarker::Page(page));
        previous = page;
    }
    markers
}
