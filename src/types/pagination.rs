//! Pagination types for list queries.
//!
//! [`PageRequest`] is what a caller asks for, [`PageMetadata`] is the
//! navigation data derived from the total row count, and [`PagedList`] pairs
//! one page of items with that metadata. The arithmetic lives here so it can be
//! used both for store-backed queries (see `infra::repositories::paginate`)
//! and for sequences that are already in memory.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::errors::{AppError, AppResult};

/// Pagination query parameters (DRY - reusable across all list queries)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page_number: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PageRequest {
    /// Build a validated request.
    pub fn new(page_number: u64, page_size: u64) -> AppResult<Self> {
        let request = Self {
            page_number,
            page_size,
        };
        request.validate()?;
        Ok(request)
    }

    /// Reject requests that would produce a meaningless skip/take range.
    pub fn validate(&self) -> AppResult<()> {
        if self.page_number < 1 {
            return Err(AppError::validation("page number must be at least 1"));
        }
        if self.page_size < 1 {
            return Err(AppError::validation("page size must be greater than 0"));
        }
        Ok(())
    }

    /// Rows to skip, or `None` when the offset does not fit in a `u64`
    /// (such a page is necessarily past the end).
    pub fn offset(&self) -> Option<u64> {
        self.page_number.checked_sub(1)?.checked_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Navigation metadata for one page.
///
/// Serializes to the shape presentation layers put in the
/// [`PAGINATION_HEADER`](crate::config::PAGINATION_HEADER) header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageMetadata {
    pub total_count: u64,
    pub page_size: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageMetadata {
    /// Derive navigation data from the total row count.
    pub fn new(total_count: u64, request: &PageRequest) -> Self {
        let page_size = request.page_size;
        let total_pages = if page_size > 0 {
            total_count.div_ceil(page_size)
        } else {
            0
        };
        let current_page = request.page_number;

        Self {
            total_count,
            page_size,
            current_page,
            total_pages,
            has_next: current_page < total_pages,
            has_previous: current_page > 1,
        }
    }

    /// JSON value for the pagination response header
    pub fn to_header_value(&self) -> AppResult<String> {
        serde_json::to_string(self).map_err(|e| AppError::internal(e.to_string()))
    }
}

/// One page of items plus navigation metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub meta: PageMetadata,
}

impl<T> PagedList<T> {
    /// Create a page from items already fetched for `request`
    pub fn new(items: Vec<T>, total_count: u64, request: &PageRequest) -> Self {
        Self {
            items,
            meta: PageMetadata::new(total_count, request),
        }
    }

    /// Page through a sequence that is already in memory.
    ///
    /// The whole sequence is consumed to count it; ordering is preserved.
    pub fn from_items<I>(source: I, request: &PageRequest) -> AppResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        request.validate()?;

        let all: Vec<T> = source.into_iter().collect();
        let total_count = all.len() as u64;

        let items = match request.offset().and_then(|o| usize::try_from(o).ok()) {
            Some(skip) if skip < all.len() => {
                let take = usize::try_from(request.page_size).unwrap_or(usize::MAX);
                all.into_iter().skip(skip).take(take).collect()
            }
            _ => Vec::new(),
        };

        Ok(Self::new(items, total_count, request))
    }

    /// Convert the items, keeping the metadata
    pub fn map<U, F>(self, f: F) -> PagedList<U>
    where
        F: FnMut(T) -> U,
    {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
