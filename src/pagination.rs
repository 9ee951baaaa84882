//! Page/page-size handling shared by every listing endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Query parameters accepted by listing endpoints (`?page=2&page_size=20`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PaginationQuery {
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: u32,
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// The row window to fetch for this page.
    pub fn window(&self) -> PageWindow {
        paginate(self.page, self.page_size, 0)
    }
}

/// Offset/limit pair plus the page count for a given total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
    pub total_pages: u32,
}

/// Converts a page request and a row count into an offset window and a page count.
///
/// `page` and `page_size` are expected to be validated already (`page >= 1`,
/// `1 <= page_size <= 100`).
pub fn paginate(page: u32, page_size: u32, total: i64) -> PageWindow {
    let size = i64::from(page_size);
    let total_pages = if total <= 0 || size == 0 {
        0
    } else {
        u32::try_from((total - 1) / size + 1).unwrap_or(u32::MAX)
    };

    PageWindow {
        offset: i64::from(page.saturating_sub(1)) * size,
        limit: size,
        total_pages,
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub total_pages: u32,
}

/// A page of records plus its metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, query: PaginationQuery, total: i64) -> Self {
        let window = paginate(query.page, query.page_size, total);
        Self {
            data,
            pagination: Pagination {
                page: query.page,
                page_size: query.page_size,
                total,
                total_pages: window.total_pages,
            },
        }
    }
}
