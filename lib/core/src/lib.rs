//! Core domain types and utilities for the flowdex workflow catalog.
//!
//! This crate provides the canonical workflow record produced by ingestion,
//! the classification enums shared by every layer, the workflow identifier,
//! and the `Result` alias used for layered error handling.

pub mod digest;
pub mod error;
pub mod id;
pub mod kind;
pub mod record;

pub use error::Result;
pub use id::{ParseIdError, WorkflowId};
pub use kind::{ComplexityTier, NodeCategory, ParseKindError, TriggerType};
pub use record::{NodeRecord, UNKNOWN_NODE_TYPE, WorkflowRecord};
