//! Pagination plus equality-filter descriptor for list queries.

use serde::Serialize;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_TAKE: i64 = 10;

/// A list request: which page, how many rows, whether to hide soft-deleted
/// rows, and the equality filter `F`.
///
/// Non-positive `page`/`take` values fall back to the defaults when the
/// limit and offset are computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging<F> {
    pub page: i64,
    pub take: i64,
    pub is_active: bool,
    pub filter: F,
}

impl<F: Default> Default for Paging<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F> Paging<F> {
    /// First page of [`DEFAULT_TAKE`] rows, including inactive rows.
    pub fn new(filter: F) -> Self {
        Self {
            page: DEFAULT_PAGE,
            take: DEFAULT_TAKE,
            is_active: false,
            filter,
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_take(mut self, take: i64) -> Self {
        self.take = take;
        self
    }

    #[must_use]
    pub fn active_only(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// The effective page number (1-based).
    pub fn page(&self) -> i64 {
        if self.page < 1 {
            DEFAULT_PAGE
        } else {
            self.page
        }
    }

    /// Rows per page, rendered as `LIMIT`.
    pub fn limit(&self) -> i64 {
        if self.take < 1 {
            DEFAULT_TAKE
        } else {
            self.take
        }
    }

    /// Rows skipped, rendered as `OFFSET`.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Number of pages needed for `total` matching rows.
    pub fn total_pages(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.limit() - 1) / self.limit()
        }
    }
}
