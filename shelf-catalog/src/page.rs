//! Page slicing for long listings.
//!
//! The caller drives navigation; this module only computes which slice is
//! visible for a page index and how many pages there are.

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One visible page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Zero-based page index after clamping.
    pub index: usize,
    pub total_pages: usize,
    /// Position of `items[0]` in the full list.
    pub offset: usize,
}

impl<T> Page<'_, T> {
    /// One-based page number for display ("Page 1 of 3").
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// `ceil(len / page_size)`. A page size of zero is treated as one.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Slice out page `page_index`, clamped to `[0, total_pages - 1]`.
///
/// An empty list yields an empty page with `total_pages == 0`.
pub fn paginate<T>(items: &[T], page_size: usize, page_index: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total = total_pages(items.len(), page_size);
    let index = page_index.min(total.saturating_sub(1));
    let start = (index * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    Page {
        items: &items[start..end],
        index,
        total_pages: total,
        offset: start,
    }
}

/// A navigation request from the pager UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    Left,
    Right,
    Exit,
}

impl PagerAction {
    /// Parse the pager prompt input: `1`/`left`/`h`, `2`/`right`/`l`,
    /// `3`/`back`/`exit`/`q`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "1" | "left" | "h" | "prev" | "<" => Some(Self::Left),
            "2" | "right" | "l" | "r" | "n" | "next" | ">" => Some(Self::Right),
            "3" | "back" | "exit" | "q" | "quit" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Current page of an interactive listing. No wraparound at either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    total_pages: usize,
}

impl Pager {
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            page: 0,
            total_pages: total_pages(len, page_size),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Apply an action. Returns `false` once the pager has exited.
    pub fn apply(&mut self, action: PagerAction) -> bool {
        match action {
            PagerAction::Left => {
                self.page = self.page.saturating_sub(1);
                true
            }
            PagerAction::Right => {
                self.page = (self.page + 1).min(self.total_pages.saturating_sub(1));
                true
            }
            PagerAction::Exit => false,
        }
    }
}
