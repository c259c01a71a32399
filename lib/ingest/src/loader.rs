//! Directory scanning with per-document failure containment.
//!
//! The loader reads every `*.json` file directly inside its directory, in
//! filename order, and normalizes each one independently. A document that
//! fails is recorded in [`LoadedCollection::failures`] and the scan moves on.
//! The result is cached until [`WorkflowLoader::clear_cache`] is called.

use crate::error::LoadError;
use crate::normalize::Normalizer;
use flowdex_core::WorkflowRecord;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A document that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub filename: String,
    pub message: String,
}

/// The outcome of one directory scan.
#[derive(Debug, Clone, Default)]
pub struct LoadedCollection {
    /// Successfully normalized records, in filename order.
    pub records: Vec<WorkflowRecord>,
    /// Documents that could not be read or normalized.
    pub failures: Vec<LoadFailure>,
}

impl LoadedCollection {
    /// Number of documents the scan attempted.
    #[must_use]
    pub fn scanned(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

/// Loads and caches the workflow collection of one directory.
pub struct WorkflowLoader {
    dir: PathBuf,
    normalizer: Normalizer,
    cache: Mutex<Option<Arc<LoadedCollection>>>,
}

impl WorkflowLoader {
    /// Creates a loader for a directory.
    pub fn new(dir: impl Into<PathBuf>, normalizer: Normalizer) -> Self {
        Self {
            dir: dir.into(),
            normalizer,
            cache: Mutex::new(None),
        }
    }

    /// Returns the scanned directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the cached collection, scanning the directory on first use.
    ///
    /// A missing directory yields an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be listed.
    pub fn load_workflows(&self) -> flowdex_core::Result<Arc<LoadedCollection>, LoadError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.as_ref() {
            debug!(records = cached.records.len(), "Using cached workflow collection");
            return Ok(Arc::clone(cached));
        }

        let loaded = Arc::new(self.scan()?);
        *cache = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Drops the cached collection so the next load rescans the directory.
    pub fn clear_cache(&self) {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns true if a scan result is cached.
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn scan(&self) -> Result<LoadedCollection, LoadError> {
        if !self.dir.exists() {
            warn!(dir = %self.dir.display(), "Workflows directory not found");
            return Ok(LoadedCollection::default());
        }
        if !self.dir.is_dir() {
            return Err(LoadError::NotADirectory {
                path: self.dir.clone(),
            });
        }

        let started = Instant::now();
        info!(dir = %self.dir.display(), "Scanning workflows directory");

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(LoadError::DirectoryUnreadable {
                        path: self.dir.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!(error = %e, "Error accessing entry");
                    continue;
                }
            };
            let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
            if entry.file_type().is_file() && is_json {
                files.push(entry.into_path());
            }
        }

        let mut loaded = LoadedCollection::default();
        for path in files {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let outcome = std::fs::read(&path)
                .map_err(|e| format!("failed to read {filename}: {e}"))
                .and_then(|raw| {
                    self.normalizer
                        .normalize_document(&raw, &filename)
                        .map_err(|e| e.to_string())
                });

            match outcome {
                Ok(record) => loaded.records.push(record),
                Err(message) => {
                    warn!(filename = %filename, error = %message, "Failed to load workflow");
                    loaded.failures.push(LoadFailure { filename, message });
                }
            }
        }

        info!(
            loaded = loaded.records.len(),
            failed = loaded.failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Workflow scan complete"
        );
        Ok(loaded)
    }
}
