//! Integration extraction from node type identifiers.
//!
//! A node type such as `n8n-nodes-base.googleSheets` implies the service
//! "Google Sheets". Generic control-flow and data-shaping nodes are not
//! integrations and are filtered by an exclusion list.

use flowdex_core::{NodeRecord, UNKNOWN_NODE_TYPE};
use std::collections::BTreeSet;

/// Node names that never count as integrations, in normalized form
/// (lower case, no whitespace).
pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "manualtrigger",
    "set",
    "if",
    "function",
    "functionitem",
    "merge",
    "split",
    "noop",
    "webhook",
    "cron",
    "interval",
    "wait",
    "datetime",
    "code",
    "xml",
    "json",
    "html",
    "markdown",
    "crypto",
    "executecommand",
    "readbinaryfile",
    "writebinaryfile",
    "readbinaryfiles",
    "spreadsheetfile",
    "editimage",
    "respondtowebhook",
    "httprequest",
    "movefiles",
    "compress",
    "start",
    "stopanderror",
    "error",
];

/// The set of service names excluded from integration lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationExclusions {
    names: BTreeSet<String>,
}

impl Default for IntegrationExclusions {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

impl IntegrationExclusions {
    /// Builds an exclusion list. Entries are normalized, so `"Manual Trigger"`
    /// and `"manualTrigger"` are equivalent.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names.into_iter().map(|n| normalize_key(n.as_ref())).collect(),
        }
    }

    /// Returns true if the service name is excluded.
    #[must_use]
    pub fn is_excluded(&self, service: &str) -> bool {
        self.names.contains(&normalize_key(service))
    }

    /// Returns the number of excluded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Extracts the de-duplicated integrations of a node list, in first-seen
    /// order.
    #[must_use]
    pub fn extract(&self, nodes: &[NodeRecord]) -> Vec<String> {
        let mut integrations: Vec<String> = Vec::new();
        for node in nodes {
            if node.type_name == UNKNOWN_NODE_TYPE {
                continue;
            }
            let Some(service) = service_name(&node.type_name) else {
                continue;
            };
            if self.is_excluded(&service) || integrations.contains(&service) {
                continue;
            }
            integrations.push(service);
        }
        integrations
    }
}

/// Extracts integrations using the default exclusion list.
#[must_use]
pub fn extract_integrations(nodes: &[NodeRecord]) -> Vec<String> {
    IntegrationExclusions::default().extract(nodes)
}

/// Derives a human-readable service name from a node type identifier.
///
/// Takes the last dot-delimited segment (or the last hyphen-delimited one if
/// there are no dots), splits camelCase into words, and title-cases them.
/// Returns `None` when nothing readable remains.
#[must_use]
pub fn service_name(type_name: &str) -> Option<String> {
    let segment = if type_name.contains('.') {
        type_name.rsplit('.').next().unwrap_or_default()
    } else if type_name.contains('-') {
        type_name.rsplit('-').next().unwrap_or_default()
    } else {
        type_name
    };

    let mut spaced = String::with_capacity(segment.len() + 4);
    for c in segment.chars() {
        if c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    let words: Vec<String> = spaced
        .to_lowercase()
        .split_whitespace()
        .map(capitalize)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn normalize_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
