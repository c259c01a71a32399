//! Approximate multi-field matching.
//!
//! [`FuzzyIndex`] is the capability the search engine needs: build from a
//! record snapshot, then score a query against it. [`WeightedFieldIndex`]
//! implements it with weighted fields and a similarity threshold, using
//! Damerau-Levenshtein similarity from `strsim` for the approximate part.
//!
//! Scores are in `[0, 1]` where 0 is a perfect match. Matching is
//! location-agnostic: a term found anywhere inside a field scores 0.

use flowdex_core::WorkflowRecord;
use serde::Deserialize;

/// Floor applied to perfect field scores so field weights still order them.
const PERFECT_SCORE_FLOOR: f64 = 0.001;

/// One record that matched a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch {
    /// Position of the record in the snapshot the index was built from.
    pub position: usize,
    /// Match quality; lower is better.
    pub score: f64,
}

/// An approximate-matching index over a record snapshot.
pub trait FuzzyIndex: Send + Sync + Sized {
    /// Tuning knobs for building the index.
    type Options: Clone + Send + Sync;

    /// Builds an index over `records`. Match positions refer to this slice.
    fn build(records: &[WorkflowRecord], options: &Self::Options) -> Self;

    /// Returns matching records, best first; ties keep snapshot order.
    fn query(&self, text: &str) -> Vec<ScoredMatch>;
}

/// Relative weight of each searchable field.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub name: f64,
    pub filename: f64,
    pub node_types: f64,
    pub node_names: f64,
    pub tags: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 0.3,
            filename: 0.2,
            node_types: 0.2,
            node_names: 0.1,
            tags: 0.2,
        }
    }
}

impl FieldWeights {
    fn as_array(&self) -> [f64; FIELD_COUNT] {
        [self.name, self.filename, self.node_types, self.node_names, self.tags]
    }
}

/// Options for [`WeightedFieldIndex`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FuzzyOptions {
    /// Largest field score that still counts as a match.
    pub threshold: f64,
    pub weights: FieldWeights,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            weights: FieldWeights::default(),
        }
    }
}

const FIELD_COUNT: usize = 5;

/// Lower-cased searchable text of one record, per field.
#[derive(Debug, Clone)]
struct IndexedRecord {
    fields: [Vec<String>; FIELD_COUNT],
}

impl IndexedRecord {
    fn from_record(record: &WorkflowRecord) -> Self {
        let lower = |s: &str| s.to_lowercase();
        Self {
            fields: [
                vec![lower(&record.display_name)],
                vec![lower(&record.source_filename)],
                record.nodes.iter().map(|n| lower(&n.type_name)).collect(),
                record
                    .nodes
                    .iter()
                    .filter(|n| !n.name.is_empty())
                    .map(|n| lower(&n.name))
                    .collect(),
                record.tags.iter().map(|t| lower(t)).collect(),
            ],
        }
    }
}

/// Weighted multi-field fuzzy index.
///
/// The query is split on whitespace and every term must match at least one
/// field within the threshold. A term's score combines the fields it matched,
/// each raised to its normalized weight, so heavier fields and multi-field
/// hits rank first. A record's score is the mean over its terms.
#[derive(Debug, Clone)]
pub struct WeightedFieldIndex {
    options: FuzzyOptions,
    normalized_weights: [f64; FIELD_COUNT],
    entries: Vec<IndexedRecord>,
}

impl FuzzyIndex for WeightedFieldIndex {
    type Options = FuzzyOptions;

    fn build(records: &[WorkflowRecord], options: &FuzzyOptions) -> Self {
        let raw = options.weights.as_array();
        let total: f64 = raw.iter().filter(|w| **w > 0.0).sum();
        let normalized_weights = raw.map(|w| if total > 0.0 && w > 0.0 { w / total } else { 0.0 });
        Self {
            options: options.clone(),
            normalized_weights,
            entries: records.iter().map(IndexedRecord::from_record).collect(),
        }
    }

    fn query(&self, text: &str) -> Vec<ScoredMatch> {
        let lowered = text.to_lowercase();
        let terms: Vec<&str> = lowered.split_whitespace().collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<ScoredMatch> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                self.score_entry(entry, &terms)
                    .map(|score| ScoredMatch { position, score })
            })
            .collect();

        matches.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.position.cmp(&b.position)));
        matches
    }
}

impl WeightedFieldIndex {
    fn score_entry(&self, entry: &IndexedRecord, terms: &[&str]) -> Option<f64> {
        let mut total = 0.0;
        for term in terms {
            total += self.score_term(entry, term)?;
        }
        Some(total / terms.len() as f64)
    }

    fn score_term(&self, entry: &IndexedRecord, term: &str) -> Option<f64> {
        let mut combined = 1.0;
        let mut matched = false;

        for (values, weight) in entry.fields.iter().zip(self.normalized_weights) {
            if weight <= 0.0 {
                continue;
            }
            let best = values
                .iter()
                .map(|v| field_score(term, v))
                .fold(1.0_f64, f64::min);
            if best <= self.options.threshold {
                matched = true;
                combined *= best.max(PERFECT_SCORE_FLOOR).powf(weight);
            }
        }

        matched.then_some(combined)
    }
}

/// Scores one term against one lower-cased field value.
///
/// A substring hit scores 0. Otherwise the term is compared against each
/// word of the value, each pair of adjacent words joined, and the prefix of
/// each of those with the term's length; the best similarity wins.
fn field_score(term: &str, value: &str) -> f64 {
    if term.is_empty() || value.contains(term) {
        return 0.0;
    }

    let words: Vec<&str> = value
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let term_len = term.chars().count();

    let mut candidates: Vec<String> = words.iter().map(|w| (*w).to_string()).collect();
    candidates.extend(words.windows(2).map(|pair| pair.concat()));

    candidates
        .iter()
        .flat_map(|candidate| {
            let prefix: String = candidate.chars().take(term_len).collect();
            [
                1.0 - strsim::normalized_damerau_levenshtein(term, candidate),
                1.0 - strsim::normalized_damerau_levenshtein(term, &prefix),
            ]
        })
        .fold(1.0, f64::min)
}
