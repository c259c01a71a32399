//! Shared application state.

use crate::config::{SearchConfig, ServerConfig};
use flowdex_catalog::{Catalog, InMemoryStore};
use flowdex_classify::Classifier;
use flowdex_ingest::{Normalizer, WorkflowLoader};

/// State shared by every handler.
pub struct AppState {
    /// The workflow catalog.
    pub catalog: Catalog,
    /// Page size limits and search tuning.
    pub search: SearchConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(catalog: Catalog, search: SearchConfig) -> Self {
        Self { catalog, search }
    }

    /// Wires an empty catalog from configuration. Call
    /// [`Catalog::rebuild`] before serving.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let normalizer = Normalizer::new(Classifier::default(), config.active_policy);
        let loader = WorkflowLoader::new(&config.workflows_dir, normalizer);
        let catalog = Catalog::new(loader, InMemoryStore::new(), config.search.fuzzy_options());
        Self::new(catalog, config.search.clone())
    }
}
