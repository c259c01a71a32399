//! Ingestion of exported workflow documents.
//!
//! This crate turns untrusted workflow JSON into canonical
//! [`WorkflowRecord`](flowdex_core::WorkflowRecord)s:
//!
//! - **Raw documents**: a defaulted, optional-field schema that tolerates
//!   missing or mistyped fields
//! - **Normalizer**: resolves names, the active flag, and every derived field
//! - **Loader**: scans a directory, contains per-document failures, and
//!   caches the resulting collection

pub mod error;
pub mod loader;
pub mod normalize;
pub mod raw;

pub use error::{LoadError, NormalizationError};
pub use loader::{LoadFailure, LoadedCollection, WorkflowLoader};
pub use normalize::{ActivePolicy, Normalizer, display_name_from_filename};
pub use raw::{RawNode, RawWorkflowDocument};
