use serde::{Deserialize, Serialize};

/// Default page size used by the dashboard's tables.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page index and size passed straight through to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based index of this page.
    pub number: u32,
    pub first: bool,
    pub last: bool,
}

impl<T> PageResponse<T> {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.content.iter()
    }

    /// Request for the following page, or None on the last page.
    pub fn next_page(&self) -> Option<PageRequest> {
        if self.last {
            None
        } else {
            Some(PageRequest::new(self.number + 1, self.size))
        }
    }

    /// Whether the page metadata agrees with itself.
    ///
    /// A non-empty result set must place `number` inside `0..total_pages`, and
    /// the first/last flags must match the page's position.
    pub fn is_consistent(&self) -> bool {
        if self.total_elements == 0 {
            return self.content.is_empty();
        }
        if self.number >= self.total_pages {
            return false;
        }
        self.first == (self.number == 0) && self.last == (self.number + 1 == self.total_pages)
    }
}

impl<T> IntoIterator for PageResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
