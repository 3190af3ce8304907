//! Offset pagination shared by every listing operation.

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// A validated page/per-page pair. `per_page` is capped at 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    per_page: u64,
}

impl PageRequest {
    pub const MAX_PER_PAGE: u64 = 50;

    pub fn new(page: u64, per_page: u64) -> DomainResult<Self> {
        if page < 1 || per_page < 1 || per_page > Self::MAX_PER_PAGE {
            return Err(DomainError::Validation(
                "Invalid pagination parameters".into(),
            ));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of items to skip before this page starts. Saturates so an
    /// absurd `page` skips everything instead of overflowing.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page) as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, per_page: 10 }
    }
}

/// One page of results plus the pagination envelope the API serializes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        let total_pages = total_items.div_ceil(request.per_page);
        Self {
            items,
            current_page: request.page,
            total_pages,
            total_items,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_items: self.total_items,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}
