//! Error types for the ingest crate.
//!
//! - `NormalizationError`: a single document could not be normalized
//! - `LoadError`: the workflow directory itself could not be scanned

use std::fmt;
use std::path::PathBuf;

/// Errors from normalizing one document.
///
/// These never abort a directory scan; the loader records them and moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// The bytes are not valid JSON.
    InvalidJson { filename: String, reason: String },
    /// The JSON is valid but its top level is not an object.
    NotAnObject { filename: String },
}

impl NormalizationError {
    /// Returns the source filename of the failed document.
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::InvalidJson { filename, .. } | Self::NotAnObject { filename } => filename,
        }
    }
}

impl fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson { filename, reason } => {
                write!(f, "invalid JSON in {filename}: {reason}")
            }
            Self::NotAnObject { filename } => {
                write!(f, "{filename} is not a JSON object")
            }
        }
    }
}

impl std::error::Error for NormalizationError {}

/// Errors from scanning the workflow directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The configured path exists but is not a directory.
    NotADirectory { path: PathBuf },
    /// The directory could not be listed.
    DirectoryUnreadable { path: PathBuf, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADirectory { path } => {
                write!(f, "not a directory: {}", path.display())
            }
            Self::DirectoryUnreadable { path, reason } => {
                write!(f, "cannot read directory {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {}
