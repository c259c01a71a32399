//! Centralized server configuration.
//!
//! Loaded via the `config` crate from `FLOWDEX__`-prefixed environment
//! variables, with `__` separating nested keys, e.g.
//! `FLOWDEX__WORKFLOWS_DIR` or `FLOWDEX__SEARCH__THRESHOLD`.

use flowdex_ingest::ActivePolicy;
use flowdex_search::{FieldWeights, FuzzyOptions};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FLOWDEX";

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding the exported workflow documents.
    #[serde(default = "default_workflows_dir")]
    pub workflows_dir: PathBuf,

    /// How a document without an explicit `active` flag is resolved.
    #[serde(default)]
    pub active_policy: ActivePolicy,

    /// Search tuning and page size limits.
    #[serde(default)]
    pub search: SearchConfig,
}

/// Search-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Largest fuzzy score that still counts as a match (0 = exact only).
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Relative weight of each searchable field.
    #[serde(default)]
    pub weights: FieldWeights,

    /// Page size when the request gives none.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Largest page size a request may ask for.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_workflows_dir() -> PathBuf {
    PathBuf::from("workflows")
}

fn default_threshold() -> f64 {
    0.4
}

fn default_limit() -> usize {
    50
}

fn default_max_limit() -> usize {
    100
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            weights: FieldWeights::default(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

impl SearchConfig {
    /// Options for building the fuzzy index.
    #[must_use]
    pub fn fuzzy_options(&self) -> FuzzyOptions {
        FuzzyOptions {
            threshold: self.threshold,
            weights: self.weights,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            workflows_dir: default_workflows_dir(),
            active_policy: ActivePolicy::default(),
            search: SearchConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
