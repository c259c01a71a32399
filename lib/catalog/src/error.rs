//! Error types for the catalog crate.

use std::fmt;

/// Errors from catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No record has the given source filename.
    NotFound { filename: String },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { filename } => write!(f, "workflow not found: {filename}"),
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = CatalogError::NotFound {
            filename: "7_Missing.json".to_string(),
        };
        assert_eq!(err.to_string(), "workflow not found: 7_Missing.json");
    }
}
