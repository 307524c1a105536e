//! Pagination metadata for comment pages

use serde::{Deserialize, Serialize};

/// Default number of top-level comments per page
pub const DEFAULT_PAGE_SIZE: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current: u32,
    pub pages: u32,
    pub total: u64,
    pub size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageInfo {
    /// Compute page metadata for `requested` (1-based, clamped to at least 1)
    pub fn compute(total: u64, requested: u32, size: u32) -> Self {
        let size = size.max(1);
        let current = requested.max(1);
        let pages = u32::try_from(total.div_ceil(u64::from(size))).unwrap_or(u32::MAX);
        Self {
            current,
            pages,
            total,
            size,
            has_next: current < pages,
            has_previous: current > 1,
        }
    }

    /// Index of the first item on the current page
    pub fn offset(&self) -> usize {
        (self.current as usize - 1) * self.size as usize
    }

    /// Page on which the item at 1-based `position` lands
    pub fn page_of(position: u64, size: u32) -> u32 {
        let pages = position.max(1).div_ceil(u64::from(size.max(1)));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether `page` can be navigated to
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.pages
    }

    /// Record one more item on the last page
    pub fn record_insert(&mut self) {
        *self = Self::compute(self.total + 1, self.current, self.size);
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::compute(0, 1, DEFAULT_PAGE_SIZE)
    }
}
