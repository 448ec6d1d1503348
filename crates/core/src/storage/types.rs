use serde::{Deserialize, Serialize};

use super::PageRequestError;

/// Pagination parameters for list queries.
///
/// Only constructible through [`PageRequest::new`], deserialization included,
/// so `page >= 1` and `limit > 0` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

/// Unvalidated wire form of [`PageRequest`].
#[derive(Deserialize)]
struct RawPageRequest {
    page: u32,
    limit: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(raw: RawPageRequest) -> Result<Self, Self::Error> {
        PageRequest::new(raw.page, raw.limit)
    }
}

impl PageRequest {
    /// Creates a page request, validating that `page >= 1` and `limit > 0`.
    pub fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::InvalidPage(page));
        }
        if limit == 0 {
            return Err(PageRequestError::InvalidLimit);
        }
        Ok(Self { page, limit })
    }

    /// The 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The maximum number of items on the page.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// The number of rows preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// An ordered page of results plus the total row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
        }
    }
}
