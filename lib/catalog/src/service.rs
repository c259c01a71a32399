//! The catalog service object shared by every request handler.
//!
//! A [`Catalog`] owns the loader, the collection store, and the search
//! engine. [`Catalog::rebuild`] is the only writer; everything else reads
//! the current store and index snapshot.

use crate::error::CatalogError;
use crate::store::{CollectionStore, InMemoryStore};
use flowdex_core::{NodeCategory, WorkflowRecord};
use flowdex_ingest::{LoadError, LoadFailure, WorkflowLoader};
use flowdex_search::{
    CatalogStats, FuzzyOptions, IntegrationUsage, SearchEngine, SearchQuery, SearchResult,
};
use serde::Serialize;
use std::sync::{PoisonError, RwLock};
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Outcome of one rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildSummary {
    /// Records now in the store.
    pub indexed: usize,
    /// Documents skipped during the scan.
    pub failures: Vec<LoadFailure>,
}

/// One node category and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub name: NodeCategory,
    pub keywords: Vec<&'static str>,
}

/// The workflow catalog.
pub struct Catalog<S = InMemoryStore> {
    loader: WorkflowLoader,
    store: RwLock<S>,
    engine: SearchEngine,
}

impl<S: CollectionStore> Catalog<S> {
    /// Creates a catalog over an existing store. The search index is built
    /// from the store's current contents.
    pub fn new(loader: WorkflowLoader, store: S, search: FuzzyOptions) -> Self {
        let engine = SearchEngine::new(store.get_all(), search);
        Self {
            loader,
            store: RwLock::new(store),
            engine,
        }
    }

    /// Rescans the workflow directory, replaces the store contents, and
    /// swaps in a fresh search index.
    ///
    /// # Errors
    ///
    /// Returns an error if the workflow directory cannot be scanned. The
    /// store and index are left untouched in that case.
    #[instrument(skip(self), fields(dir = %self.loader.dir().display()))]
    pub fn rebuild(&self) -> flowdex_core::Result<RebuildSummary, LoadError> {
        let started = Instant::now();
        self.loader.clear_cache();
        let loaded = self.loader.load_workflows()?;

        let records = {
            let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
            store.clear();
            for record in &loaded.records {
                store.upsert(record.clone());
            }
            store.get_all()
        };
        let indexed = records.len();
        self.engine.update_index(records);

        if !loaded.failures.is_empty() {
            warn!(failed = loaded.failures.len(), "Some workflows were skipped");
        }
        info!(
            indexed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog rebuilt"
        );

        Ok(RebuildSummary {
            indexed,
            failures: loaded.failures.clone(),
        })
    }

    /// Runs a search against the current index.
    #[instrument(skip(self, query))]
    pub fn search(&self, query: &SearchQuery) -> SearchResult {
        self.engine.search(query)
    }

    /// Fetches one record by source filename.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no record has that filename.
    pub fn get_workflow(
        &self,
        filename: &str,
    ) -> flowdex_core::Result<WorkflowRecord, CatalogError> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.get_by_filename(filename).ok_or_else(|| {
            CatalogError::NotFound {
                filename: filename.to_string(),
            }
            .into()
        })
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        self.engine.stats()
    }

    #[must_use]
    pub fn integrations(&self) -> Vec<IntegrationUsage> {
        self.engine.integrations()
    }

    #[must_use]
    pub fn suggestions(&self, limit: usize) -> Vec<String> {
        self.engine.suggestions(limit)
    }

    /// Every category with its keywords; `Other` has none.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryInfo> {
        NodeCategory::ALL
            .into_iter()
            .map(|name| CategoryInfo {
                name,
                keywords: flowdex_classify::CATEGORY_KEYWORDS
                    .iter()
                    .find(|(category, _)| *category == name)
                    .map(|(_, keywords)| keywords.to_vec())
                    .unwrap_or_default(),
            })
            .collect()
    }
}
