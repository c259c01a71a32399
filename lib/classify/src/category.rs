//! Service categories of node types.

use flowdex_core::NodeCategory;

/// Lower-case keywords per category, in classification order.
pub const CATEGORY_KEYWORDS: &[(NodeCategory, &[&str])] = &[
    (NodeCategory::Trigger, &["trigger", "webhook", "cron"]),
    (NodeCategory::Communication, &["slack", "email", "telegram", "discord"]),
    (NodeCategory::Database, &["mysql", "postgres", "mongo", "redis"]),
    (NodeCategory::CloudStorage, &["drive", "dropbox", "s3", "storage"]),
    (NodeCategory::Crm, &["hubspot", "salesforce", "pipedrive", "crm"]),
    (NodeCategory::Analytics, &["analytics", "mixpanel", "segment"]),
    (NodeCategory::SocialMedia, &["twitter", "facebook", "linkedin", "social"]),
    (NodeCategory::Productivity, &["notion", "trello", "asana", "todo"]),
    (NodeCategory::ECommerce, &["shopify", "stripe", "paypal", "commerce"]),
    (NodeCategory::Development, &["github", "gitlab", "jira", "docker"]),
];

/// Maps a node type to its category. The first category with a keyword
/// contained in the lower-cased type wins; otherwise [`NodeCategory::Other`].
#[must_use]
pub fn categorize_node_type(type_name: &str) -> NodeCategory {
    let lowered = type_name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map_or(NodeCategory::Other, |(category, _)| *category)
}
