//! Raw workflow document schema.
//!
//! Exported documents are untrusted: any field may be missing, null, or of
//! the wrong type. Every field here deserializes leniently, so a mistyped
//! field reads as absent instead of rejecting the whole document. Node
//! entries map 1:1 onto [`RawNode`]s; an entry that is not an object becomes
//! an empty node.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value as JsonValue};

/// A parsed-and-defaulted workflow document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawWorkflowDocument {
    #[serde(deserialize_with = "lenient_scalar")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub active: Option<bool>,
    #[serde(deserialize_with = "lenient_nodes")]
    pub nodes: Vec<RawNode>,
    #[serde(deserialize_with = "lenient")]
    pub connections: Option<Map<String, JsonValue>>,
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    pub settings: Option<JsonValue>,
    #[serde(deserialize_with = "lenient_scalar")]
    pub version_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One raw node entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawNode {
    #[serde(deserialize_with = "lenient_scalar")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub node_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub type_version: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub parameters: Option<Map<String, JsonValue>>,
    #[serde(deserialize_with = "lenient")]
    pub credentials: Option<Map<String, JsonValue>>,
    #[serde(deserialize_with = "lenient")]
    pub position: Option<[f64; 2]>,
    #[serde(deserialize_with = "lenient")]
    pub disabled: Option<bool>,
}

/// Why a buffer could not be read as a workflow document.
#[derive(Debug)]
pub enum RawParseError {
    /// The buffer is not JSON.
    Json(serde_json::Error),
    /// The JSON top level is not an object.
    NotAnObject,
}

impl RawWorkflowDocument {
    /// Parses a document from raw bytes.
    ///
    /// # Errors
    ///
    /// Fails only if the bytes are not JSON or the top level is not an
    /// object. Field-level problems never fail.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RawParseError> {
        let value: JsonValue = serde_json::from_slice(bytes).map_err(RawParseError::Json)?;
        if !value.is_object() {
            return Err(RawParseError::NotAnObject);
        }
        Self::deserialize(value).map_err(RawParseError::Json)
    }

    /// Counts link targets across every output of every node in the
    /// connection map. Malformed entries count as zero.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        let Some(connections) = &self.connections else {
            return 0;
        };
        connections
            .values()
            .filter_map(JsonValue::as_object)
            .flat_map(|outputs| outputs.values())
            .filter_map(JsonValue::as_array)
            .flatten()
            .filter_map(JsonValue::as_array)
            .map(|targets| targets.iter().filter(|t| t.is_object()).count())
            .sum()
    }
}

/// Deserializes any value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Accepts a string or a number, rendered as a string.
fn lenient_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_nodes<'de, D>(deserializer: D) -> Result<Vec<RawNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let JsonValue::Array(items) = JsonValue::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

/// Tags are exported either as plain strings or as `{ "name": ... }` objects.
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let JsonValue::Array(items) = JsonValue::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            JsonValue::String(s) => Some(s),
            JsonValue::Object(mut obj) => match obj.remove("name") {
                Some(JsonValue::String(s)) => Some(s),
                _ => None,
            },
            _ => None,
        })
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_all_defaults() {
        let doc = RawWorkflowDocument::from_slice(b"{}").expect("parse");
        assert_eq!(doc, RawWorkflowDocument::default());
    }

    #[test]
    fn rejects_non_json_and_non_objects() {
        assert!(matches!(
            RawWorkflowDocument::from_slice(b"not json"),
            Err(RawParseError::Json(_))
        ));
        assert!(matches!(
            RawWorkflowDocument::from_slice(b"[1, 2]"),
            Err(RawParseError::NotAnObject)
        ));
    }

    #[test]
    fn mistyped_fields_read_as_absent() {
        let doc = RawWorkflowDocument::from_slice(
            br#"{"name": 12, "active": "yes", "nodes": {"a": 1}, "tags": "x", "connections": []}"#,
        )
        .expect("parse");
        assert_eq!(doc.name, None);
        assert_eq!(doc.active, None);
        assert!(doc.nodes.is_empty());
        assert!(doc.tags.is_empty());
        assert_eq!(doc.connections, None);
    }

    #[test]
    fn malformed_node_entries_are_kept_as_empty_nodes() {
        let doc = RawWorkflowDocument::from_slice(
            br#"{"nodes": [42, {"type": "n8n-nodes-base.slack", "typeVersion": 2.1, "id": 7}]}"#,
        )
        .expect("parse");
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[0], RawNode::default());
        assert_eq!(doc.nodes[1].node_type.as_deref(), Some("n8n-nodes-base.slack"));
        assert_eq!(doc.nodes[1].type_version, Some(2.1));
        assert_eq!(doc.nodes[1].id.as_deref(), Some("7"));
    }

    #[test]
    fn tags_accept_strings_and_objects() {
        let doc = RawWorkflowDocument::from_slice(
            br#"{"tags": ["ops", {"id": "1", "name": " Sales "}, {"id": "2"}, 5, ""]}"#,
        )
        .expect("parse");
        assert_eq!(doc.tags, vec!["ops", "Sales"]);
    }

    #[test]
    fn counts_connection_targets() {
        let doc = RawWorkflowDocument::from_slice(
            br#"{"connections": {
                "Start": {"main": [[{"node": "A", "type": "main", "index": 0},
                                    {"node": "B", "type": "main", "index": 0}]]},
                "A": {"main": [[{"node": "C", "type": "main", "index": 0}], []]},
                "Broken": "nope"
            }}"#,
        )
        .expect("parse");
        assert_eq!(doc.connection_count(), 3);
    }

    #[test]
    fn timestamps_parse_rfc3339() {
        let doc = RawWorkflowDocument::from_slice(
            br#"{"createdAt": "2023-04-01T10:00:00.000Z", "updatedAt": "yesterday"}"#,
        )
        .expect("parse");
        assert!(doc.created_at.is_some());
        assert_eq!(doc.updated_at, None);
    }
}
