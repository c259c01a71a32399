//! Search over the workflow catalog.
//!
//! The [`SearchEngine`] holds an immutable snapshot of the collection with a
//! fuzzy text index built over it. A query ranks records by text relevance
//! (or keeps store order for blank text), applies structured filters, counts
//! facets over everything that matched, and finally cuts one page.

pub mod engine;
pub mod facet;
pub mod filter;
pub mod fuzzy;
pub mod query;
pub mod stats;

pub use engine::{SearchEngine, Snapshot};
pub use facet::{ActiveStatusFacet, FacetSummary, NodeCountFacet};
pub use filter::{FilterValue, SearchFilters};
pub use fuzzy::{FieldWeights, FuzzyIndex, FuzzyOptions, ScoredMatch, WeightedFieldIndex};
pub use query::{DEFAULT_LIMIT, Pagination, SearchQuery, SearchResult};
pub use stats::{CatalogStats, IntegrationUsage, integration_usage, record_categories, suggestions};
