//! Normalization of raw documents into canonical records.

use crate::error::NormalizationError;
use crate::raw::{RawNode, RawParseError, RawWorkflowDocument};
use chrono::Utc;
use flowdex_classify::{Classifier, generate_description};
use flowdex_core::{NodeRecord, UNKNOWN_NODE_TYPE, WorkflowId, WorkflowRecord, digest};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// Display name used when neither the document nor the filename yields one.
const UNTITLED: &str = "Untitled Workflow";

/// How a workflow's `active` flag is resolved when the document does not
/// declare one.
///
/// An explicit boolean `active` field always wins under every policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivePolicy {
    /// Inactive when the filename mentions "manual", unless it also mentions
    /// "scheduled" or "webhook". Matching is case-insensitive.
    #[default]
    FilenameInference,
    /// Active unless the document explicitly says otherwise.
    DefaultActive,
}

impl ActivePolicy {
    /// Resolves the active flag for a document.
    #[must_use]
    pub fn resolve_active(&self, declared: Option<bool>, filename: &str) -> bool {
        if let Some(active) = declared {
            return active;
        }
        match self {
            Self::FilenameInference => {
                let lower = filename.to_lowercase();
                !lower.contains("manual")
                    || lower.contains("scheduled")
                    || lower.contains("webhook")
            }
            Self::DefaultActive => true,
        }
    }
}

/// Produces canonical records from raw workflow documents.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    classifier: Classifier,
    active_policy: ActivePolicy,
}

impl Normalizer {
    /// Creates a normalizer.
    #[must_use]
    pub fn new(classifier: Classifier, active_policy: ActivePolicy) -> Self {
        Self {
            classifier,
            active_policy,
        }
    }

    /// Returns the active policy in use.
    #[must_use]
    pub fn active_policy(&self) -> ActivePolicy {
        self.active_policy
    }

    /// Normalizes one raw document.
    ///
    /// Derived fields depend only on `raw` and `filename`; normalizing the
    /// same input twice yields records that differ only in `analyzed_at`.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not JSON or is not a JSON object.
    pub fn normalize(
        &self,
        raw: &[u8],
        filename: &str,
    ) -> flowdex_core::Result<WorkflowRecord, NormalizationError> {
        Ok(self.normalize_document(raw, filename)?)
    }

    pub(crate) fn normalize_document(
        &self,
        raw: &[u8],
        filename: &str,
    ) -> Result<WorkflowRecord, NormalizationError> {
        let doc = RawWorkflowDocument::from_slice(raw).map_err(|e| match e {
            RawParseError::Json(e) => NormalizationError::InvalidJson {
                filename: filename.to_string(),
                reason: e.to_string(),
            },
            RawParseError::NotAnObject => NormalizationError::NotAnObject {
                filename: filename.to_string(),
            },
        })?;

        let connection_count = doc.connection_count();
        let RawWorkflowDocument {
            id: source_id,
            name,
            active,
            nodes,
            connections,
            tags: declared_tags,
            settings,
            version_id,
            created_at,
            updated_at,
        } = doc;

        let nodes: Vec<NodeRecord> = nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| node_record(index, node))
            .collect();

        let display_name = match name.as_deref().map(str::trim) {
            Some(declared) if !declared.is_empty() => declared.to_string(),
            _ => display_name_from_filename(filename),
        };

        let classification = self.classifier.classify(filename, &nodes);
        let description = generate_description(
            &display_name,
            &classification.integrations,
            classification.trigger_type,
        );

        let mut tags = classification.filename_tags;
        for tag in declared_tags {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let node_count = nodes.len();
        Ok(WorkflowRecord {
            id: WorkflowId::from_filename(filename),
            source_filename: filename.to_string(),
            display_name,
            source_id,
            active: self.active_policy.resolve_active(active, filename),
            connections: JsonValue::Object(connections.unwrap_or_default()),
            connection_count,
            node_count,
            trigger_count: classification.trigger_count,
            regular_node_count: node_count - classification.trigger_count,
            trigger_type: classification.trigger_type,
            complexity: classification.complexity,
            integrations: classification.integrations,
            tags,
            description,
            version_id,
            settings: settings.unwrap_or(JsonValue::Null),
            content_hash: digest::content_hash(raw),
            file_size_bytes: raw.len() as u64,
            created_at,
            updated_at,
            analyzed_at: Utc::now(),
            nodes,
        })
    }
}

fn node_record(index: usize, node: RawNode) -> NodeRecord {
    let name = node.name.unwrap_or_default();
    let identifier = node
        .id
        .filter(|id| !id.is_empty())
        .or_else(|| (!name.is_empty()).then(|| name.clone()))
        .unwrap_or_else(|| format!("node-{index}"));
    let type_name = node
        .node_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_NODE_TYPE.to_string());
    let credentials = node.credentials.unwrap_or_default();

    NodeRecord {
        identifier,
        name,
        type_name,
        type_version: node.type_version.unwrap_or(1.0),
        parameters: node.parameters.unwrap_or_else(Map::new),
        credentials_present: !credentials.is_empty(),
        credential_types: credentials.keys().cloned().collect(),
        position: node.position,
        disabled: node.disabled.unwrap_or(false),
    }
}

/// Derives a display name from a filename: strips the numeric prefix and the
/// `.json` suffix, splits on underscores, and capitalizes each word.
#[must_use]
pub fn display_name_from_filename(filename: &str) -> String {
    let stem = filename.strip_suffix(".json").unwrap_or(filename);
    let digits = stem.len() - stem.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let stem = if digits > 0 && stem[digits..].starts_with('_') {
        &stem[digits + 1..]
    } else {
        stem
    };

    let words: Vec<String> = stem
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        UNTITLED.to_string()
    } else {
        words.join(" ")
    }
}
