//! Pagination control state

use shared::Paginated;

/// One numbered page button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub page: u32,
    pub current: bool,
}

/// What a pager renders for a paginated response.
///
/// Buttons are produced on demand, so a backend reporting a huge
/// `totalPages` costs nothing until a renderer walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControl {
    pub current: u32,
    pub total_pages: u32,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl PageControl {
    /// One button per page; previous is disabled on the first page and
    /// next on the last
    pub fn new(current: u32, total_pages: u32) -> Self {
        let current = current.clamp(1, total_pages.max(1));
        Self {
            current,
            total_pages,
            prev_disabled: current <= 1,
            next_disabled: current >= total_pages,
        }
    }

    pub fn from_page<T>(page: &Paginated<T>) -> Self {
        Self::new(page.page, page.total_pages)
    }

    /// Every page button, first to last
    pub fn buttons(&self) -> impl Iterator<Item = PageButton> + '_ {
        self.range(1, self.total_pages)
    }

    /// At most `max` consecutive buttons, centered on the current page
    pub fn window(&self, max: u32) -> impl Iterator<Item = PageButton> + '_ {
        if max == 0 || self.total_pages == 0 {
            return self.range(1, 0);
        }
        let max = max.min(self.total_pages);
        let start = self
            .current
            .saturating_sub(max / 2)
            .clamp(1, self.total_pages - max + 1);
        self.range(start, start + (max - 1))
    }

    fn range(&self, first: u32, last: u32) -> impl Iterator<Item = PageButton> + '_ {
        (first..=last).map(move |page| PageButton {
            page,
            current: page == self.current,
        })
    }

    pub fn prev(&self) -> Option<u32> {
        (!self.prev_disabled).then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (!self.next_disabled).then(|| self.current + 1)
    }

    /// Whether `page` is a page this control can jump to
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }
}
