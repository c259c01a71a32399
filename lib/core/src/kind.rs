//! Classification enums derived for every catalogued workflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a classification label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError {
    /// The kind of label being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseKindError {}

/// How a workflow is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Started by a user.
    Manual,
    /// Started by an inbound HTTP call.
    Webhook,
    /// Started by a cron, schedule, or interval node.
    Scheduled,
    /// Started by a node that polls an external service.
    Polling,
}

impl TriggerType {
    /// All trigger types in display order.
    pub const ALL: [Self; 4] = [Self::Manual, Self::Webhook, Self::Scheduled, Self::Polling];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Webhook => "webhook",
            Self::Scheduled => "scheduled",
            Self::Polling => "polling",
        }
    }
}

/// Size tier of a workflow, derived from its node count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    /// At most three nodes.
    Simple,
    /// Four to eight nodes.
    Medium,
    /// More than eight nodes.
    Complex,
}

impl ComplexityTier {
    /// All tiers from smallest to largest.
    pub const ALL: [Self; 3] = [Self::Simple, Self::Medium, Self::Complex];

    /// Returns the wire label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Medium => "medium",
            Self::Complex => "complex",
        }
    }
}

/// Service category of a single node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeCategory {
    Trigger,
    Communication,
    Database,
    #[serde(rename = "Cloud Storage")]
    CloudStorage,
    #[serde(rename = "CRM")]
    Crm,
    Analytics,
    #[serde(rename = "Social Media")]
    SocialMedia,
    Productivity,
    #[serde(rename = "E-commerce")]
    ECommerce,
    Development,
    Other,
}

impl NodeCategory {
    /// All categories in classification order, `Other` last.
    pub const ALL: [Self; 11] = [
        Self::Trigger,
        Self::Communication,
        Self::Database,
        Self::CloudStorage,
        Self::Crm,
        Self::Analytics,
        Self::SocialMedia,
        Self::Productivity,
        Self::ECommerce,
        Self::Development,
        Self::Other,
    ];

    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trigger => "Trigger",
            Self::Communication => "Communication",
            Self::Database => "Database",
            Self::CloudStorage => "Cloud Storage",
            Self::Crm => "CRM",
            Self::Analytics => "Analytics",
            Self::SocialMedia => "Social Media",
            Self::Productivity => "Productivity",
            Self::ECommerce => "E-commerce",
            Self::Development => "Development",
            Self::Other => "Other",
        }
    }
}

/// Implements `Display` and case-insensitive `FromStr` over `ALL`/`as_str`.
macro_rules! impl_label {
    ($name:ident, $kind:expr) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseKindError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseKindError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

impl_label!(TriggerType, "trigger type");
impl_label!(ComplexityTier, "complexity tier");
impl_label!(NodeCategory, "node category");
