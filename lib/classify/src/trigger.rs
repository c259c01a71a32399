//! Trigger type detection.

use flowdex_core::{NodeRecord, TriggerType};

/// Substrings that mark a node as a trigger candidate.
const TRIGGER_KEYWORDS: &[&str] = &["trigger", "webhook", "cron", "schedule", "interval", "manual"];

/// Node types counted as trigger nodes for the trigger/regular split.
const TRIGGER_NODE_TYPES: &[&str] = &[
    "Manual Trigger",
    "Webhook",
    "Cron",
    "Interval",
    "HTTP Request",
    "manualTrigger",
    "webhook",
    "cron",
    "interval",
    "httpRequest",
];

/// Determines how a workflow is started.
///
/// The first node (in source order) whose type mentions a trigger keyword
/// decides the result; later trigger nodes are ignored. Without any such node
/// the workflow is manual.
#[must_use]
pub fn determine_trigger_type(nodes: &[NodeRecord]) -> TriggerType {
    let Some(first) = nodes
        .iter()
        .map(|n| n.type_name.to_lowercase())
        .find(|t| TRIGGER_KEYWORDS.iter().any(|k| t.contains(k)))
    else {
        return TriggerType::Manual;
    };

    if first.contains("manual") {
        TriggerType::Manual
    } else if first.contains("webhook") {
        TriggerType::Webhook
    } else if ["cron", "schedule", "interval"].iter().any(|k| first.contains(k)) {
        TriggerType::Scheduled
    } else if first.contains("poll") {
        TriggerType::Polling
    } else {
        TriggerType::Manual
    }
}

/// Returns true if the node type is one of the fixed trigger node types.
///
/// Only the last dot-delimited segment is compared, so
/// `n8n-nodes-base.manualTrigger` matches `manualTrigger`.
#[must_use]
pub fn is_trigger_node(type_name: &str) -> bool {
    let short = type_name.rsplit('.').next().unwrap_or(type_name);
    TRIGGER_NODE_TYPES.contains(&short)
}

/// Counts the nodes for which [`is_trigger_node`] holds.
#[must_use]
pub fn count_trigger_nodes(nodes: &[NodeRecord]) -> usize {
    nodes.iter().filter(|n| is_trigger_node(&n.type_name)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::nodes;

    #[test]
    fn first_matching_node_wins() {
        let forward = nodes(&["someCronNode", "someWebhookTrigger"]);
        assert_eq!(determine_trigger_type(&forward), TriggerType::Scheduled);

        let reversed = nodes(&["someWebhookTrigger", "someCronNode"]);
        assert_eq!(determine_trigger_type(&reversed), TriggerType::Webhook);
    }

    #[test]
    fn no_trigger_nodes_is_manual() {
        assert_eq!(determine_trigger_type(&[]), TriggerType::Manual);
        let nodes = nodes(&["n8n-nodes-base.slack", "n8n-nodes-base.set"]);
        assert_eq!(determine_trigger_type(&nodes), TriggerType::Manual);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let nodes = nodes(&["n8n-nodes-base.ScheduleTrigger"]);
        assert_eq!(determine_trigger_type(&nodes), TriggerType::Scheduled);
    }

    #[test]
    fn manual_trigger_and_polling() {
        let manual = nodes(&["n8n-nodes-base.manualTrigger"]);
        assert_eq!(determine_trigger_type(&manual), TriggerType::Manual);

        let polling = nodes(&["acme.pollTrigger"]);
        assert_eq!(determine_trigger_type(&polling), TriggerType::Polling);

        let other = nodes(&["n8n-nodes-base.gmailTrigger"]);
        assert_eq!(determine_trigger_type(&other), TriggerType::Manual);
    }

    #[test]
    fn interval_is_scheduled() {
        let nodes = nodes(&["n8n-nodes-base.interval"]);
        assert_eq!(determine_trigger_type(&nodes), TriggerType::Scheduled);
    }

    #[test]
    fn trigger_node_counting() {
        assert!(is_trigger_node("n8n-nodes-base.manualTrigger"));
        assert!(is_trigger_node("Webhook"));
        assert!(!is_trigger_node("n8n-nodes-base.slackTrigger"));

        let nodes = nodes(&[
            "n8n-nodes-base.webhook",
            "n8n-nodes-base.httpRequest",
            "n8n-nodes-base.slack",
        ]);
        assert_eq!(count_trigger_nodes(&nodes), 2);
    }
}
