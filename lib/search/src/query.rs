//! Search requests and their paginated results.

use crate::facet::FacetSummary;
use crate::filter::SearchFilters;
use flowdex_core::WorkflowRecord;
use serde::Serialize;

/// Page size used when none is given.
pub const DEFAULT_LIMIT: usize = 50;

/// An offset/limit window over an ordered result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    #[must_use]
    pub const fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Converts a 1-based page number into a window. Page 0 reads as page 1.
    #[must_use]
    pub const fn from_page(page: usize, per_page: usize) -> Self {
        Self {
            offset: page.saturating_sub(1).saturating_mul(per_page),
            limit: per_page,
        }
    }

    /// Returns the window's slice of `items`; empty when past the end.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        &items[start..end]
    }

    /// Returns true if records remain beyond this window.
    #[must_use]
    pub const fn has_more(&self, total: usize) -> bool {
        self.offset.saturating_add(self.limit) < total
    }
}

/// One search request: free text, filters, and a window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    /// Free text; blank means "no text constraint".
    pub text: String,
    pub filters: SearchFilters,
    pub pagination: Pagination,
}

impl SearchQuery {
    /// A query matching every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Returns the trimmed text, or `None` if blank.
    #[must_use]
    pub fn text_terms(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// One page of search results with facets over the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub workflows: Vec<WorkflowRecord>,
    /// Number of records matching text and filters, before pagination.
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
    pub facets: FacetSummary,
}
