//! Classification heuristics for catalogued workflows.
//!
//! Every function here is pure: the same nodes and filename always produce
//! the same integrations, trigger type, complexity tier, tags, and
//! description. Empty inputs resolve to documented defaults rather than
//! errors.

pub mod category;
pub mod complexity;
pub mod description;
pub mod integration;
pub mod tags;
pub mod trigger;

pub use category::{CATEGORY_KEYWORDS, categorize_node_type};
pub use complexity::classify_complexity;
pub use description::generate_description;
pub use integration::{IntegrationExclusions, extract_integrations, service_name};
pub use tags::extract_tags_from_filename;
pub use trigger::{count_trigger_nodes, determine_trigger_type, is_trigger_node};

use flowdex_core::{ComplexityTier, NodeRecord, TriggerType};

/// Derived classification of one workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub integrations: Vec<String>,
    pub trigger_type: TriggerType,
    pub complexity: ComplexityTier,
    pub trigger_count: usize,
    /// Tags implied by the filename alone.
    pub filename_tags: Vec<String>,
}

/// Applies all heuristics with a configurable integration exclusion list.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    exclusions: IntegrationExclusions,
}

impl Classifier {
    /// Creates a classifier with a custom exclusion list.
    #[must_use]
    pub fn new(exclusions: IntegrationExclusions) -> Self {
        Self { exclusions }
    }

    /// Returns the exclusion list in use.
    #[must_use]
    pub fn exclusions(&self) -> &IntegrationExclusions {
        &self.exclusions
    }

    /// Classifies a workflow from its nodes and source filename.
    #[must_use]
    pub fn classify(&self, filename: &str, nodes: &[NodeRecord]) -> Classification {
        Classification {
            integrations: self.exclusions.extract(nodes),
            trigger_type: determine_trigger_type(nodes),
            complexity: classify_complexity(nodes.len()),
            trigger_count: count_trigger_nodes(nodes),
            filename_tags: extract_tags_from_filename(filename),
        }
    }
}
