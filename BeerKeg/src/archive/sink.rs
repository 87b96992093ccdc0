//! Output sinks for extracted entries and decoded samples
//!
//! Extraction hands every output file to an [`OutputSink`] as a path relative
//! to the output root plus its bytes. Sinks are shared across rayon workers,
//! so they must be `Sync`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::error::{Error, Result};

/// Destination for output files
pub trait OutputSink: Sync {
    /// Store `data` under `relative` (relative to the sink's root).
    ///
    /// # Errors
    /// Returns [`Error::WriteFailed`] if the sink rejects the write.
    fn write_file(&self, relative: &Path, data: &[u8]) -> Result<()>;
}

/// Writes files under a root directory, creating parent directories as needed
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirectorySink {
    fn write_file(&self, relative: &Path, data: &[u8]) -> Result<()> {
        let path = self.root.join(relative);
        let failed = |source| Error::WriteFailed {
            path: relative.to_path_buf(),
            source,
        };

        // Create parent directories (idempotent)
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(failed)?;
        }
        std::fs::write(&path, data).map_err(failed)
    }
}

/// Accepts every write and discards it, keeping only counts
#[derive(Debug, Default)]
pub struct DryRunSink {
    files: AtomicUsize,
    bytes: AtomicU64,
}

impl DryRunSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files that would have been written
    pub fn files(&self) -> usize {
        self.files.load(Ordering::SeqCst)
    }

    /// Number of bytes that would have been written
    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::SeqCst)
    }
}

impl OutputSink for DryRunSink {
    fn write_file(&self, relative: &Path, data: &[u8]) -> Result<()> {
        tracing::debug!("Dry run: skipping write of {} ({} bytes)", relative.display(), data.len());
        self.files.fetch_add(1, Ordering::SeqCst);
        self.bytes.fetch_add(data.len() as u64, Ordering::SeqCst);
        Ok(())
    }
}

/// Collects output files in memory, keyed by relative path
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the collected files, leaving the sink empty
    pub fn into_files(self) -> BTreeMap<PathBuf, Vec<u8>> {
        self.files
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Copy of one collected file
    pub fn get(&self, relative: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().get(relative.as_ref()).cloned()
    }

    /// Relative paths of everything written so far, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        self.files
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl OutputSink for MemorySink {
    fn write_file(&self, relative: &Path, data: &[u8]) -> Result<()> {
        self.lock().insert(relative.to_path_buf(), data.to_vec());
        Ok(())
    }
}
