//! The search engine: an immutable indexed snapshot behind a swap lock.
//!
//! Each query clones the current snapshot `Arc` and works on it without
//! holding the lock, so a concurrent [`SearchEngine::update_index`] never
//! exposes a half-built index. Readers see either the old snapshot or the
//! new one.

use crate::facet::FacetSummary;
use crate::fuzzy::{FuzzyIndex, WeightedFieldIndex};
use crate::query::{SearchQuery, SearchResult};
use crate::stats::{self, CatalogStats, IntegrationUsage};
use chrono::{DateTime, Utc};
use flowdex_core::{NodeCategory, WorkflowRecord};
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, instrument};

/// Records plus everything derived from them for querying.
pub struct Snapshot<I> {
    records: Vec<WorkflowRecord>,
    categories: Vec<BTreeSet<NodeCategory>>,
    index: I,
    built_at: DateTime<Utc>,
}

impl<I: FuzzyIndex> Snapshot<I> {
    fn build(records: Vec<WorkflowRecord>, options: &I::Options) -> Self {
        let categories = records.iter().map(stats::record_categories).collect();
        let index = I::build(&records, options);
        Self {
            records,
            categories,
            index,
            built_at: Utc::now(),
        }
    }
}

impl<I> Snapshot<I> {
    /// Records in store order.
    #[must_use]
    pub fn records(&self) -> &[WorkflowRecord] {
        &self.records
    }

    #[must_use]
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

/// Full-text and faceted search over the catalog.
pub struct SearchEngine<I: FuzzyIndex = WeightedFieldIndex> {
    options: I::Options,
    snapshot: RwLock<Arc<Snapshot<I>>>,
}

impl<I: FuzzyIndex> SearchEngine<I> {
    /// Creates an engine over an initial record set.
    pub fn new(records: Vec<WorkflowRecord>, options: I::Options) -> Self {
        let snapshot = Snapshot::build(records, &options);
        Self {
            options,
            snapshot: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Rebuilds the index from `records` and swaps it in atomically.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn update_index(&self, records: Vec<WorkflowRecord>) {
        let fresh = Arc::new(Snapshot::build(records, &self.options));
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = fresh;
        debug!("Search index swapped");
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot<I>> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs a query: rank by text (or keep store order when the text is
    /// blank), filter, compute facets over the filtered set, then paginate.
    #[instrument(skip_all, fields(text = %query.text))]
    pub fn search(&self, query: &SearchQuery) -> SearchResult {
        let snapshot = self.snapshot();

        let ranked: Vec<usize> = match query.text_terms() {
            Some(text) => snapshot.index.query(text).into_iter().map(|m| m.position).collect(),
            None => (0..snapshot.records.len()).collect(),
        };

        let matched: Vec<usize> = ranked
            .into_iter()
            .filter(|&i| query.filters.matches(&snapshot.records[i], &snapshot.categories[i]))
            .collect();

        let facets = FacetSummary::compute(
            matched
                .iter()
                .map(|&i| (&snapshot.records[i], &snapshot.categories[i])),
        );

        let total = matched.len();
        let page = query.pagination;
        let workflows = page
            .slice(&matched)
            .iter()
            .map(|&i| snapshot.records[i].clone())
            .collect();

        debug!(total, "Search complete");
        SearchResult {
            workflows,
            total,
            offset: page.offset,
            limit: page.limit,
            has_more: page.has_more(total),
            facets,
        }
    }

    /// Statistics over the indexed records.
    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        let snapshot = self.snapshot();
        CatalogStats {
            last_indexed: Some(snapshot.built_at),
            ..CatalogStats::compute(&snapshot.records)
        }
    }

    /// Integration usage over the indexed records.
    #[must_use]
    pub fn integrations(&self) -> Vec<IntegrationUsage> {
        stats::integration_usage(&self.snapshot().records)
    }

    /// Search suggestions from the indexed records.
    #[must_use]
    pub fn suggestions(&self, limit: usize) -> Vec<String> {
        stats::suggestions(&self.snapshot().records, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SearchFilters;
    use crate::fuzzy::FuzzyOptions;
    use crate::query::Pagination;
    use crate::test_support::RecordBuilder;
    use flowdex_core::{ComplexityTier, TriggerType};

    fn engine(records: Vec<WorkflowRecord>) -> SearchEngine {
        SearchEngine::new(records, FuzzyOptions::default())
    }

    fn abc() -> Vec<WorkflowRecord> {
        vec![
            RecordBuilder::new("1_A.json")
                .name("Slack Alerts")
                .trigger(TriggerType::Webhook)
                .node_types(&["n8n-nodes-base.webhook", "n8n-nodes-base.slack"])
                .integrations(&["Slack"])
                .build(),
            RecordBuilder::new("2_B.json")
                .name("Nightly GitHub Report")
                .trigger(TriggerType::Scheduled)
                .node_count(10)
                .integrations(&["Github", "Slack"])
                .build(),
            RecordBuilder::new("3_C.json")
                .name("Manual Cleanup")
                .trigger(TriggerType::Manual)
                .node_count(5)
                .build(),
        ]
    }

    fn filenames(result: &SearchResult) -> Vec<&str> {
        result.workflows.iter().map(|r| r.source_filename.as_str()).collect()
    }

    #[test]
    fn trigger_filter_end_to_end() {
        let engine = engine(abc());
        let query = SearchQuery::all()
            .with_filters(SearchFilters::default().with_trigger_type(TriggerType::Scheduled));
        let result = engine.search(&query);

        assert_eq!(filenames(&result), vec!["2_B.json"]);
        assert_eq!(result.total, 1);
        assert!(!result.has_more);
        assert_eq!(result.facets.complexity.len(), 1);
        assert_eq!(result.facets.complexity[&ComplexityTier::Complex], 1);
    }

    #[test]
    fn blank_text_keeps_store_order() {
        let engine = engine(abc());
        let result = engine.search(&SearchQuery::text("  "));
        assert_eq!(filenames(&result), vec!["1_A.json", "2_B.json", "3_C.json"]);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn text_query_ranks_and_filters() {
        let engine = engine(abc());
        let result = engine.search(&SearchQuery::text("github"));
        assert_eq!(filenames(&result), vec!["2_B.json"]);

        let result = engine.search(
            &SearchQuery::text("slack")
                .with_filters(SearchFilters::default().with_trigger_type(TriggerType::Manual)),
        );
        assert_eq!(result.total, 0);
        assert!(result.workflows.is_empty());
        assert_eq!(result.facets.total(), 0);
    }

    #[test]
    fn search_is_deterministic() {
        let engine = engine(abc());
        let query = SearchQuery::text("slack alerts");
        let first = engine.search(&query);
        for _ in 0..5 {
            assert_eq!(engine.search(&query), first);
        }
    }

    #[test]
    fn facets_cover_the_filtered_set_not_the_page() {
        let engine = engine(abc());
        let query = SearchQuery::all().with_pagination(Pagination::new(0, 1));
        let result = engine.search(&query);

        assert_eq!(result.workflows.len(), 1);
        assert_eq!(result.total, 3);
        assert!(result.has_more);
        assert_eq!(result.facets.trigger_types.values().sum::<usize>(), result.total);
        assert_eq!(result.facets.complexity.values().sum::<usize>(), result.total);
    }

    #[test]
    fn pages_past_the_end_are_empty() {
        let engine = engine(abc());
        let result = engine.search(&SearchQuery::all().with_pagination(Pagination::new(10, 5)));
        assert!(result.workflows.is_empty());
        assert_eq!(result.total, 3);
        assert!(!result.has_more);
        assert_eq!(result.offset, 10);
    }

    #[test]
    fn update_index_swaps_snapshot() {
        let engine = engine(abc());
        let before = engine.snapshot();
        engine.update_index(vec![RecordBuilder::new("9_Z.json").build()]);

        assert_eq!(before.records().len(), 3);
        assert_eq!(engine.len(), 1);
        assert!(engine.snapshot().built_at() >= before.built_at());
        assert!(engine.search(&SearchQuery::text("slack")).workflows.is_empty());
    }

    #[test]
    fn empty_engine() {
        let engine = engine(Vec::new());
        assert!(engine.is_empty());
        let result = engine.search(&SearchQuery::all());
        assert_eq!(result.total, 0);
        assert_eq!(result.facets.node_count.max, 0);
        assert_eq!(engine.stats().total, 0);
    }

    #[test]
    fn stats_carry_index_time() {
        let engine = engine(abc());
        let stats = engine.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.last_indexed, Some(engine.snapshot().built_at()));
        assert_eq!(engine.integrations()[0].name, "Slack");
    }
}
