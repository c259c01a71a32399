//! Whole-collection aggregates: statistics, integration usage, and
//! search suggestions.

use chrono::{DateTime, Utc};
use flowdex_core::{ComplexityTier, NodeCategory, TriggerType, WorkflowRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Minimum length of a name word offered as a suggestion.
const SUGGESTION_MIN_WORD_LEN: usize = 4;

/// Aggregate statistics over a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub triggers: BTreeMap<TriggerType, usize>,
    pub complexity: BTreeMap<ComplexityTier, usize>,
    pub total_nodes: usize,
    pub unique_integrations: usize,
    pub unique_node_types: usize,
    /// Node counts per category, summed over all nodes.
    pub category_node_counts: BTreeMap<NodeCategory, usize>,
    pub average_nodes: f64,
    /// When the index these numbers came from was built.
    pub last_indexed: Option<DateTime<Utc>>,
}

impl CatalogStats {
    /// Computes statistics over records. `last_indexed` is left unset.
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a WorkflowRecord>,
    {
        let mut stats = Self {
            total: 0,
            active: 0,
            inactive: 0,
            triggers: BTreeMap::new(),
            complexity: BTreeMap::new(),
            total_nodes: 0,
            unique_integrations: 0,
            unique_node_types: 0,
            category_node_counts: BTreeMap::new(),
            average_nodes: 0.0,
            last_indexed: None,
        };
        let mut integrations = BTreeSet::new();
        let mut node_types = BTreeSet::new();

        for record in records {
            stats.total += 1;
            if record.active {
                stats.active += 1;
            } else {
                stats.inactive += 1;
            }
            *stats.triggers.entry(record.trigger_type).or_default() += 1;
            *stats.complexity.entry(record.complexity).or_default() += 1;
            stats.total_nodes += record.node_count;
            integrations.extend(record.integrations.iter().map(String::as_str));
            for node in &record.nodes {
                node_types.insert(node.type_name.as_str());
                let category = flowdex_classify::categorize_node_type(&node.type_name);
                *stats.category_node_counts.entry(category).or_default() += 1;
            }
        }

        stats.unique_integrations = integrations.len();
        stats.unique_node_types = node_types.len();
        if stats.total > 0 {
            stats.average_nodes = stats.total_nodes as f64 / stats.total as f64;
        }
        stats
    }
}

/// How many records use one integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationUsage {
    pub name: String,
    pub count: usize,
}

/// Counts records per integration, most used first, ties by name.
pub fn integration_usage<'a, I>(records: I) -> Vec<IntegrationUsage>
where
    I: IntoIterator<Item = &'a WorkflowRecord>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        for integration in &record.integrations {
            *counts.entry(integration.as_str()).or_default() += 1;
        }
    }

    let mut usage: Vec<IntegrationUsage> = counts
        .into_iter()
        .map(|(name, count)| IntegrationUsage {
            name: name.to_string(),
            count,
        })
        .collect();
    usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    usage
}

/// Distinct categories of the nodes in a record.
#[must_use]
pub fn record_categories(record: &WorkflowRecord) -> BTreeSet<NodeCategory> {
    record
        .nodes
        .iter()
        .map(|node| flowdex_classify::categorize_node_type(&node.type_name))
        .collect()
}

/// Builds search suggestions: node types first, then longer words from
/// display names, de-duplicated in first-seen order.
pub fn suggestions<'a, I>(records: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a WorkflowRecord> + Clone,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    let mut offer = |candidate: String| {
        if out.len() < limit && seen.insert(candidate.clone()) {
            out.push(candidate);
        }
    };

    for record in records.clone() {
        for node in &record.nodes {
            offer(node.type_name.clone());
        }
    }
    for record in records {
        for word in record.display_name.split_whitespace() {
            if word.chars().count() >= SUGGESTION_MIN_WORD_LEN {
                offer(word.to_string());
            }
        }
    }
    out
}
