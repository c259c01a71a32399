//! The flowdex catalog: a collection store plus the service object that
//! rebuilds it from disk and answers queries over it.

pub mod error;
pub mod service;
pub mod store;

pub use error::CatalogError;
pub use service::{Catalog, CategoryInfo, RebuildSummary};
pub use store::{CollectionStore, InMemoryStore};
