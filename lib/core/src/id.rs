//! Workflow identifiers.
//!
//! Exported workflow files are conventionally named `<number>_<title>.json`.
//! The leading number becomes the identifier; files without one get a stable
//! identifier hashed from the filename so that re-imports agree.

use crate::digest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Prefix used when displaying a hashed identifier.
const HASHED_PREFIX: &str = "h";

/// Error returned when parsing an ID from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse.
    pub id_type: &'static str,
    /// The reason for the parse failure.
    pub reason: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.reason)
    }
}

impl std::error::Error for ParseIdError {}

/// Identifier for a catalogued workflow.
///
/// The identifier is derived purely from the source filename. It is not the
/// upsert key (that is the filename itself), so two files such as `7_a.json`
/// and `07_b.json` may share an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkflowId {
    /// Taken from the filename's leading `<digits>_` prefix.
    Numbered(u64),
    /// First eight bytes of the SHA-256 digest of the filename.
    Hashed(u64),
}

impl WorkflowId {
    /// Derives the identifier for a source filename.
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        leading_number(filename)
            .map_or_else(|| Self::Hashed(filename_hash(filename)), Self::Numbered)
    }

    /// Returns the numeric value regardless of variant.
    #[must_use]
    pub const fn value(&self) -> u64 {
        match self {
            Self::Numbered(n) | Self::Hashed(n) => *n,
        }
    }
}

/// Parses the `<digits>_` prefix of a filename.
fn leading_number(filename: &str) -> Option<u64> {
    let digits_end = filename
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)?;
    if digits_end == 0 || !filename[digits_end..].starts_with('_') {
        return None;
    }
    filename[..digits_end].parse().ok()
}

fn filename_hash(filename: &str) -> u64 {
    digest::digest_prefix(filename.as_bytes())
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered(n) => write!(f, "{n}"),
            Self::Hashed(h) => write!(f, "{HASHED_PREFIX}{h:016x}"),
        }
    }
}

impl FromStr for WorkflowId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |reason: String| ParseIdError {
            id_type: "WorkflowId",
            reason,
        };

        if let Some(hex) = s.strip_prefix(HASHED_PREFIX) {
            return u64::from_str_radix(hex, 16)
                .map(Self::Hashed)
                .map_err(|e| parse_err(e.to_string()));
        }

        s.parse::<u64>()
            .map(Self::Numbered)
            .map_err(|e| parse_err(e.to_string()))
    }
}

impl Serialize for WorkflowId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WorkflowId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
