//! Structured filters over indexed records.
//!
//! Every populated filter must hold for a record to be kept. Enum-valued
//! filters keep the raw text of values they do not recognize; such a filter
//! is still active and matches nothing.

use flowdex_core::{ComplexityTier, NodeCategory, TriggerType, WorkflowRecord};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A filter value that may not have parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: FromStr> FilterValue<T> {
    /// Parses `raw`, keeping the text when it is not a known value.
    pub fn parse(raw: &str) -> Self {
        raw.parse()
            .map_or_else(|_| Self::Unrecognized(raw.to_string()), Self::Known)
    }
}

impl<T: PartialEq> FilterValue<T> {
    fn accepts(&self, value: &T) -> bool {
        match self {
            Self::Known(expected) => expected == value,
            Self::Unrecognized(_) => false,
        }
    }
}

impl<T> From<T> for FilterValue<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: fmt::Display> fmt::Display for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(value) => value.fmt(f),
            Self::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Conjunctive record filters. `None` and an empty tag list mean "any".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    /// Matches if any node falls in the category.
    pub category: Option<FilterValue<NodeCategory>>,
    pub trigger_type: Option<FilterValue<TriggerType>>,
    pub complexity: Option<FilterValue<ComplexityTier>>,
    pub active: Option<bool>,
    /// Inclusive lower bound on node count.
    pub min_nodes: Option<usize>,
    /// Inclusive upper bound on node count.
    pub max_nodes: Option<usize>,
    pub has_credentials: Option<bool>,
    /// Matches if the record carries at least one of these tags.
    pub tags: Vec<String>,
}

impl SearchFilters {
    pub fn with_category(mut self, category: impl Into<FilterValue<NodeCategory>>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_trigger_type(mut self, trigger: impl Into<FilterValue<TriggerType>>) -> Self {
        self.trigger_type = Some(trigger.into());
        self
    }

    pub fn with_complexity(mut self, tier: impl Into<FilterValue<ComplexityTier>>) -> Self {
        self.complexity = Some(tier.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_node_range(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_nodes = min;
        self.max_nodes = max;
        self
    }

    pub fn with_credentials(mut self, has_credentials: bool) -> Self {
        self.has_credentials = Some(has_credentials);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if no filter is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if the record passes every populated filter.
    ///
    /// `categories` are the distinct node categories of the record.
    #[must_use]
    pub fn matches(&self, record: &WorkflowRecord, categories: &BTreeSet<NodeCategory>) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|wanted| categories.iter().any(|c| wanted.accepts(c)));
        let trigger_ok = self
            .trigger_type
            .as_ref()
            .is_none_or(|wanted| wanted.accepts(&record.trigger_type));
        let complexity_ok = self
            .complexity
            .as_ref()
            .is_none_or(|wanted| wanted.accepts(&record.complexity));
        if !(category_ok && trigger_ok && complexity_ok) {
            return false;
        }
        if self.active.is_some_and(|active| record.active != active) {
            return false;
        }
        if self.min_nodes.is_some_and(|min| record.node_count < min) {
            return false;
        }
        if self.max_nodes.is_some_and(|max| record.node_count > max) {
            return false;
        }
        if self
            .has_credentials
            .is_some_and(|wanted| record.has_credentials() != wanted)
        {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|tag| record.has_tag(tag)) {
            return false;
        }
        true
    }
}
