//! Collection storage keyed by source filename.

use flowdex_core::WorkflowRecord;
use std::collections::HashMap;

/// Storage for the normalized collection.
///
/// Writes come from a single rebuild at a time; the serving path only reads.
pub trait CollectionStore: Send + Sync {
    /// Inserts a record, replacing any record with the same source filename.
    fn upsert(&mut self, record: WorkflowRecord);

    /// Returns every record in a stable order.
    fn get_all(&self) -> Vec<WorkflowRecord>;

    /// Looks up one record by its source filename.
    fn get_by_filename(&self, filename: &str) -> Option<WorkflowRecord>;

    /// Removes every record.
    fn clear(&mut self);

    /// Returns the number of stored records.
    fn len(&self) -> usize;

    /// Returns true if nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store preserving insertion order.
///
/// A replaced record keeps the position of the record it replaced.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<WorkflowRecord>,
    by_filename: HashMap<String, usize>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CollectionStore for InMemoryStore {
    fn upsert(&mut self, record: WorkflowRecord) {
        match self.by_filename.get(&record.source_filename) {
            Some(&position) => self.records[position] = record,
            None => {
                self.by_filename
                    .insert(record.source_filename.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    fn get_all(&self) -> Vec<WorkflowRecord> {
        self.records.clone()
    }

    fn get_by_filename(&self, filename: &str) -> Option<WorkflowRecord> {
        self.by_filename
            .get(filename)
            .map(|&position| self.records[position].clone())
    }

    fn clear(&mut self) {
        self.records.clear();
        self.by_filename.clear();
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

impl FromIterator<WorkflowRecord> for InMemoryStore {
    fn from_iter<T: IntoIterator<Item = WorkflowRecord>>(iter: T) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.upsert(record);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowdex_ingest::Normalizer;

    fn record(filename: &str, json: &str) -> WorkflowRecord {
        Normalizer::default()
            .normalize(json.as_bytes(), filename)
            .expect("normalize")
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut store = InMemoryStore::new();
        store.upsert(record("1_A.json", r#"{"name": "First"}"#));
        store.upsert(record("2_B.json", r#"{"name": "Second"}"#));
        store.upsert(record("1_A.json", r#"{"name": "First, revised"}"#));

        assert_eq!(store.len(), 2);
        let names: Vec<String> = store.get_all().into_iter().map(|r| r.display_name).collect();
        assert_eq!(names, vec!["First, revised", "Second"]);
    }

    #[test]
    fn lookup_by_filename() {
        let store: InMemoryStore = [record("1_A.json", "{}")].into_iter().collect();
        assert!(store.get_by_filename("1_A.json").is_some());
        assert!(store.get_by_filename("1_a.json").is_none());
    }

    #[test]
    fn colliding_ids_are_kept_apart() {
        let store: InMemoryStore = [
            record("7_Alpha.json", "{}"),
            record("7_Beta.json", "{}"),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.len(), 2);
        let a = store.get_by_filename("7_Alpha.json").expect("alpha");
        let b = store.get_by_filename("7_Beta.json").expect("beta");
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store: InMemoryStore = [record("1_A.json", "{}")].into_iter().collect();
        store.clear();
        assert!(store.is_empty());
        assert!(store.get_by_filename("1_A.json").is_none());
        store.upsert(record("2_B.json", "{}"));
        assert_eq!(store.len(), 1);
    }
}
