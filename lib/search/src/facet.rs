//! Facet counts over a filtered result set.

use flowdex_core::{ComplexityTier, NodeCategory, TriggerType, WorkflowRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Active/inactive split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActiveStatusFacet {
    pub active: usize,
    pub inactive: usize,
}

/// Node count range of the result set. All zero when the set is empty.
///
/// `avg` is rounded to the nearest whole node, halves away from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NodeCountFacet {
    pub min: usize,
    pub max: usize,
    pub avg: f64,
}

/// Aggregated counts over the records matching a query, before pagination.
///
/// Keys with a zero count are omitted. Category counts are per record: a
/// record with several nodes of one category counts once for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSummary {
    pub categories: BTreeMap<NodeCategory, usize>,
    pub trigger_types: BTreeMap<TriggerType, usize>,
    pub complexity: BTreeMap<ComplexityTier, usize>,
    pub active_status: ActiveStatusFacet,
    pub node_count: NodeCountFacet,
}

impl FacetSummary {
    /// Computes facets from `(record, categories)` pairs.
    pub fn compute<'a, I>(matched: I) -> Self
    where
        I: IntoIterator<Item = (&'a WorkflowRecord, &'a BTreeSet<NodeCategory>)>,
    {
        let mut summary = Self::default();
        let mut total = 0usize;
        let mut node_sum = 0usize;
        let mut min = usize::MAX;
        let mut max = 0usize;

        for (record, categories) in matched {
            total += 1;
            for category in categories {
                *summary.categories.entry(*category).or_default() += 1;
            }
            *summary.trigger_types.entry(record.trigger_type).or_default() += 1;
            *summary.complexity.entry(record.complexity).or_default() += 1;
            if record.active {
                summary.active_status.active += 1;
            } else {
                summary.active_status.inactive += 1;
            }
            node_sum += record.node_count;
            min = min.min(record.node_count);
            max = max.max(record.node_count);
        }

        if total > 0 {
            summary.node_count = NodeCountFacet {
                min,
                max,
                avg: (node_sum as f64 / total as f64).round(),
            };
        }
        summary
    }

    /// Number of records the summary was computed from.
    #[must_use]
    pub fn total(&self) -> usize {
        self.active_status.active + self.active_status.inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_categories;
    use crate::test_support::RecordBuilder;

    fn summarize(records: &[WorkflowRecord]) -> FacetSummary {
        let categories: Vec<_> = records.iter().map(record_categories).collect();
        FacetSummary::compute(records.iter().zip(categories.iter()))
    }

    #[test]
    fn empty_set_is_all_zero() {
        let summary = summarize(&[]);
        assert!(summary.categories.is_empty());
        assert!(summary.trigger_types.is_empty());
        assert_eq!(summary.node_count, NodeCountFacet::default());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn single_valued_facets_sum_to_total() {
        let records = vec![
            RecordBuilder::new("1_A.json")
                .trigger(TriggerType::Webhook)
                .node_count(2)
                .active(true)
                .build(),
            RecordBuilder::new("2_B.json")
                .trigger(TriggerType::Scheduled)
                .node_count(10)
                .build(),
            RecordBuilder::new("3_C.json")
                .trigger(TriggerType::Scheduled)
                .node_count(5)
                .build(),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.trigger_types.values().sum::<usize>(), 3);
        assert_eq!(summary.complexity.values().sum::<usize>(), 3);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.trigger_types[&TriggerType::Scheduled], 2);
        assert!(!summary.trigger_types.contains_key(&TriggerType::Manual));
        assert_eq!(summary.active_status, ActiveStatusFacet { active: 1, inactive: 2 });
        assert_eq!(summary.node_count.min, 2);
        assert_eq!(summary.node_count.max, 10);
        assert_eq!(summary.node_count.avg, 6.0);
    }

    #[test]
    fn average_rounds_half_up() {
        let records = vec![
            RecordBuilder::new("1_A.json").node_count(2).build(),
            RecordBuilder::new("2_B.json").node_count(3).build(),
        ];
        assert_eq!(summarize(&records).node_count.avg, 3.0);

        let records = vec![
            RecordBuilder::new("1_A.json").node_count(1).build(),
            RecordBuilder::new("2_B.json").node_count(1).build(),
            RecordBuilder::new("3_C.json").node_count(2).build(),
        ];
        assert_eq!(summarize(&records).node_count.avg, 1.0);
    }

    #[test]
    fn categories_count_each_record_once() {
        let records = vec![
            RecordBuilder::new("1_A.json")
                .node_types(&[
                    "n8n-nodes-base.slack",
                    "n8n-nodes-base.discord",
                    "n8n-nodes-base.github",
                ])
                .build(),
            RecordBuilder::new("2_B.json").node_types(&["n8n-nodes-base.slack"]).build(),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.categories[&NodeCategory::Communication], 2);
        assert_eq!(summary.categories[&NodeCategory::Development], 1);
    }

    #[test]
    fn serializes_with_labels() {
        let records = vec![
            RecordBuilder::new("1_A.json")
                .trigger(TriggerType::Scheduled)
                .node_count(10)
                .build(),
        ];
        let json = serde_json::to_value(summarize(&records)).expect("serialize");
        assert_eq!(json["triggerTypes"]["scheduled"], 1);
        assert_eq!(json["complexity"]["complex"], 1);
        assert_eq!(json["activeStatus"]["inactive"], 1);
        assert_eq!(json["nodeCount"]["max"], 10);
    }
}
