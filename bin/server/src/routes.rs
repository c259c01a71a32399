//! Read-only API routes over the catalog.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use flowdex_catalog::CategoryInfo;
use flowdex_core::WorkflowRecord;
use flowdex_search::{
    CatalogStats, FilterValue, IntegrationUsage, Pagination, SearchFilters, SearchQuery,
    SearchResult,
};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

/// Suggestions returned when the request gives no limit.
const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Query parameters for the workflow listing.
///
/// Everything arrives as text so malformed values can be reported by name.
/// Multi-word parameters accept both snake_case and camelCase spellings.
#[derive(Debug, Default, Deserialize)]
pub struct WorkflowListParams {
    q: Option<String>,
    category: Option<String>,
    #[serde(alias = "triggerType", alias = "trigger_type")]
    trigger: Option<String>,
    complexity: Option<String>,
    #[serde(alias = "activeOnly", alias = "active_only")]
    active: Option<String>,
    #[serde(alias = "minNodes")]
    min_nodes: Option<String>,
    #[serde(alias = "maxNodes")]
    max_nodes: Option<String>,
    #[serde(alias = "hasCredentials")]
    has_credentials: Option<String>,
    tags: Option<String>,
    offset: Option<String>,
    limit: Option<String>,
    page: Option<String>,
    #[serde(alias = "perPage")]
    per_page: Option<String>,
}

impl WorkflowListParams {
    /// Builds a search query, applying the configured page size limits.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] for malformed numbers or booleans,
    /// a zero page size, or page 0.
    pub fn into_query(
        self,
        default_limit: usize,
        max_limit: usize,
    ) -> Result<SearchQuery, ApiError> {
        let filters = SearchFilters {
            category: enum_filter(self.category.as_deref()),
            trigger_type: enum_filter(self.trigger.as_deref()),
            complexity: enum_filter(self.complexity.as_deref()),
            active: parse_opt("active", self.active.as_deref(), parse_bool)?,
            min_nodes: parse_opt("min_nodes", self.min_nodes.as_deref(), parse_count)?,
            max_nodes: parse_opt("max_nodes", self.max_nodes.as_deref(), parse_count)?,
            has_credentials: parse_opt(
                "has_credentials",
                self.has_credentials.as_deref(),
                parse_bool,
            )?,
            tags: self
                .tags
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|tag| !tag.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };

        let per_page = parse_opt("per_page", self.per_page.as_deref(), parse_count)?;
        let limit = parse_opt("limit", self.limit.as_deref(), parse_count)?;
        let (limit_param, requested) = match (per_page, limit) {
            (Some(n), _) => ("per_page", n),
            (None, Some(n)) => ("limit", n),
            (None, None) => ("limit", default_limit),
        };
        if requested == 0 {
            return Err(ApiError::bad_request(limit_param, "0", "page size must be positive"));
        }
        let limit = requested.min(max_limit);

        let pagination = match parse_opt("page", self.page.as_deref(), parse_count)? {
            Some(0) => return Err(ApiError::bad_request("page", "0", "pages start at 1")),
            Some(page) => Pagination::from_page(page, limit),
            None => {
                let offset = parse_opt("offset", self.offset.as_deref(), parse_count)?;
                Pagination::new(offset.unwrap_or(0), limit)
            }
        };

        Ok(SearchQuery {
            text: self.q.unwrap_or_default(),
            filters,
            pagination,
        })
    }
}

/// Query parameters for suggestions.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionParams {
    limit: Option<String>,
}

/// Searches the catalog.
pub async fn list_workflows(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WorkflowListParams>,
) -> Result<Json<SearchResult>, ApiError> {
    let query = params.into_query(state.search.default_limit, state.search.max_limit)?;
    Ok(Json(state.catalog.search(&query)))
}

/// Fetches one workflow by source filename.
pub async fn get_workflow(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<WorkflowRecord>, ApiError> {
    state
        .catalog
        .get_workflow(&filename)
        .map(Json)
        .map_err(|report| {
            tracing::debug!(error = %report, "Workflow lookup missed");
            ApiError::NotFound { filename }
        })
}

/// Catalog statistics.
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<CatalogStats> {
    Json(state.catalog.stats())
}

/// Integration usage counts.
pub async fn integrations(State(state): State<Arc<AppState>>) -> Json<Vec<IntegrationUsage>> {
    Json(state.catalog.integrations())
}

/// The category keyword table.
pub async fn categories(State(state): State<Arc<AppState>>) -> Json<Vec<CategoryInfo>> {
    Json(state.catalog.categories())
}

/// Search suggestions.
pub async fn suggestions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    let limit = parse_opt("limit", params.limit.as_deref(), parse_count)?
        .unwrap_or(DEFAULT_SUGGESTION_LIMIT);
    Ok(Json(state.catalog.suggestions(limit)))
}

/// Blank and `all` mean "no filter"; anything else is kept, recognized or not.
fn enum_filter<T: FromStr>(raw: Option<&str>) -> Option<FilterValue<T>> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return None;
    }
    Some(FilterValue::parse(raw))
}

/// Parses an optional parameter; a blank value counts as absent.
fn parse_opt<T>(
    param: &'static str,
    raw: Option<&str>,
    parse: fn(&str) -> Result<T, &'static str>,
) -> Result<Option<T>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse(value)
            .map(Some)
            .map_err(|reason| ApiError::bad_request(param, value, reason)),
    }
}

fn parse_bool(value: &str) -> Result<bool, &'static str> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err("expected true or false"),
    }
}

fn parse_count(value: &str) -> Result<usize, &'static str> {
    value.parse().map_err(|_| "expected a non-negative integer")
}
