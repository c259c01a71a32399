//! Canonical workflow records.
//!
//! A [`WorkflowRecord`] is produced once per successfully normalized workflow
//! document and is replaced wholesale on re-import. Every derived field is a
//! pure function of the source filename and the raw document bytes, except
//! `analyzed_at`.

use crate::id::WorkflowId;
use crate::kind::{ComplexityTier, TriggerType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Type name given to nodes whose document entry carries no usable type.
pub const UNKNOWN_NODE_TYPE: &str = "unknown";

/// One node of a workflow, extracted 1:1 from the raw node entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    /// Node identifier from the document, or a positional fallback.
    pub identifier: String,
    /// Node display name (may be empty).
    pub name: String,
    /// Fully qualified node type, e.g. `n8n-nodes-base.slack`. Never empty.
    pub type_name: String,
    /// Node type version. Defaults to 1.
    pub type_version: f64,
    /// Node parameters, kept opaque.
    pub parameters: Map<String, JsonValue>,
    /// Whether the node references at least one credential.
    pub credentials_present: bool,
    /// Credential kinds the node references. Credential values are dropped.
    pub credential_types: Vec<String>,
    /// Canvas position, when present.
    pub position: Option<[f64; 2]>,
    /// Whether the node is disabled in the editor.
    pub disabled: bool,
}

/// The canonical, derived-field-complete representation of one workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    /// Identifier derived from the filename.
    pub id: WorkflowId,
    /// Source filename; unique within a collection.
    pub source_filename: String,
    /// Declared name, or a title-cased derivation of the filename.
    pub display_name: String,
    /// The `id` field carried inside the document, if any.
    pub source_id: Option<String>,
    /// Resolved activity flag.
    pub active: bool,
    /// Nodes in source order.
    pub nodes: Vec<NodeRecord>,
    /// Raw connection map. Stored and surfaced, never executed.
    pub connections: JsonValue,
    /// Number of link targets across all node outputs.
    pub connection_count: usize,
    pub node_count: usize,
    pub trigger_count: usize,
    pub regular_node_count: usize,
    pub trigger_type: TriggerType,
    pub complexity: ComplexityTier,
    /// Normalized service names, de-duplicated, first-seen order.
    pub integrations: Vec<String>,
    /// Filename tags followed by document tags, de-duplicated.
    pub tags: Vec<String>,
    /// Generated one-line summary.
    pub description: String,
    pub version_id: Option<String>,
    /// Document settings, kept opaque.
    pub settings: JsonValue,
    /// Hex SHA-256 of the raw document bytes, for change detection.
    pub content_hash: String,
    pub file_size_bytes: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// When this record was produced. Excluded from idempotence checks.
    pub analyzed_at: DateTime<Utc>,
}

impl WorkflowRecord {
    /// Returns true if any node carries a non-empty credentials map.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.nodes.iter().any(|n| n.credentials_present)
    }

    /// Returns true if the record carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
