use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StoreError, StoreResult};
use super::record::{BatchFilter, ReviewRecord, VerdictUpdate};

const TEMP_EXTENSION: &str = "tmp";

/// Persistence used by the batch driver.
pub trait ReviewStore {
    /// Reviews selected by `filter`, in store order.
    fn candidates(&self, filter: &BatchFilter) -> StoreResult<Vec<ReviewRecord>>;

    /// Records the verdict for review `id`.
    fn save_verdict(&mut self, id: u64, update: &VerdictUpdate) -> StoreResult<()>;

    /// Makes saved verdicts durable.
    fn flush(&mut self) -> StoreResult<()>;
}

#[derive(Debug)]
/// Reviews kept in one JSON array file.
///
/// Verdicts are applied in memory and written on [`flush`](ReviewStore::flush) by writing a
/// sibling temp file and renaming it over the original.
pub struct JsonReviewStore {
    path: PathBuf,
    records: Vec<ReviewRecord>,
    dirty: bool,
}

impl JsonReviewStore {
    /// Reads the review file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let raw = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let records: Vec<ReviewRecord> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), reviews = records.len(), "Loaded review store");
        Ok(Self {
            path,
            records,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TEMP_EXTENSION);
        self.path.with_file_name(name)
    }
}

impl ReviewStore for JsonReviewStore {
    fn candidates(&self, filter: &BatchFilter) -> StoreResult<Vec<ReviewRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    fn save_verdict(&mut self, id: u64, update: &VerdictUpdate) -> StoreResult<()> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { id })?;
        record.apply(update);
        self.dirty = true;
        Ok(())
    }

    fn flush(&mut self) -> StoreResult<()> {
        if !self.dirty {
            return Ok(());
        }

        let bytes = serde_json::to_vec_pretty(&self.records)?;
        let temp_path = self.temp_path();
        let io_err = |source| StoreError::Io {
            path: temp_path.clone(),
            source,
        };

        {
            let mut file = File::create(&temp_path).map_err(io_err)?;
            file.write_all(&bytes).map_err(io_err)?;
            file.sync_all().map_err(io_err)?;
        }

        fs::rename(&temp_path, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        self.dirty = false;
        debug!(path = %self.path.display(), "Flushed review store");
        Ok(())
    }
}
