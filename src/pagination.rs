//! Paged collections and pagination metadata

use serde::Serialize;
use utoipa::ToSchema;

/// Response header carrying the serialized [`PaginationMetadata`].
/// Lowercase because axum header names are built with `from_static`.
pub const PAGINATION_HEADER: &str = "x-pagination";

/// A window over a query result set
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page_size: i64,
    pub current_page: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, current_page: i64, page_size: i64) -> Self {
        Self {
            items,
            total_count,
            page_size,
            current_page,
        }
    }

    /// Total number of pages for this window (ceiling division)
    pub fn total_pages(&self) -> i64 {
        if self.page_size <= 0 {
            return 0;
        }
        (self.total_count + self.page_size - 1) / self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }
}

/// Pagination metadata emitted in the `X-Pagination` response header
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count: i64,
    pub page_size: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub previous_page_link: Option<String>,
    pub next_page_link: Option<String>,
}

impl PaginationMetadata {
    pub fn for_page<T>(
        page: &Page<T>,
        previous_page_link: Option<String>,
        next_page_link: Option<String>,
    ) -> Self {
        Self {
            total_count: page.total_count,
            page_size: page.page_size,
            current_page: page.current_page,
            total_pages: page.total_pages(),
            previous_page_link,
            next_page_link,
        }
    }
}

/// Builder for page navigation links, re-emitting the current query parameters
pub struct LinkBuilder {
    path: String,
    params: Vec<(String, String)>,
}

impl LinkBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a parameter only when a value is present
    pub fn param_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn build(self) -> String {
        if self.params.is_empty() {
            return self.path;
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}
