//! Generated workflow summaries.

use flowdex_core::TriggerType;

/// Number of integrations named in a description.
const MAX_NAMED_INTEGRATIONS: usize = 3;

/// Formats the one-line summary of a workflow.
#[must_use]
pub fn generate_description(
    display_name: &str,
    integrations: &[String],
    trigger_type: TriggerType,
) -> String {
    let services = if integrations.is_empty() {
        "various services".to_string()
    } else {
        integrations
            .iter()
            .take(MAX_NAMED_INTEGRATIONS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let trigger = match trigger_type {
        TriggerType::Manual => "manually triggered".to_string(),
        other => format!("{other} trigger"),
    };
    format!("Workflow automating {services} with {trigger}. {display_name} integration.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_at_most_three_integrations() {
        let integrations: Vec<String> = ["Slack", "Github", "Notion", "Jira"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let text = generate_description("Ship It", &integrations, TriggerType::Webhook);
        assert_eq!(
            text,
            "Workflow automating Slack, Github, Notion with webhook trigger. Ship It integration."
        );
    }

    #[test]
    fn manual_without_integrations() {
        let text = generate_description("Cleanup", &[], TriggerType::Manual);
        assert_eq!(
            text,
            "Workflow automating various services with manually triggered. Cleanup integration."
        );
    }
}
