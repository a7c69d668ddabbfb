//! Pagination utilities for service layer
//!
//! `Pagination` is the caller's request; `PageMeta` is what gets reported
//! back, computed from the size of the whole filtered set.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub page_size: u32,
}

impl Pagination {
    /// Clamp to sane bounds: page >= 1, 1 <= page_size <= 100.
    pub fn normalize(self) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of records before this page: `(page - 1) * page_size`.
    pub fn skip(&self) -> u64 {
        (self.page.max(1) as u64 - 1) * self.page_size as u64
    }

    pub fn limit(&self) -> u64 { self.page_size as u64 }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, page_size: DEFAULT_PAGE_SIZE } }
}

/// Pagination block of a list response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(pagination: Pagination, total_items: u64) -> Self {
        let page_size = pagination.page_size.max(1);
        Self {
            page: pagination.page,
            page_size,
            total_items,
            total_pages: total_items.div_ceil(page_size as u64),
        }
    }
}

/// One page of results plus metadata about the whole filtered set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}
