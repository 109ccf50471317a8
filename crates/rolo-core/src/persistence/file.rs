//! File-backed record store
//!
//! Save protocol:
//! 1. encode every record (nothing touches disk if one is unencodable)
//! 2. write the full content to the temp path and `sync_all`
//! 3. `rename` temp -> primary, then sync the parent directory
//!
//! Load prefers the primary path and falls back to the temp path, which only
//! survives alone when a crash hit between steps 2 and 3. A recovered temp
//! file is promoted to primary; if that rename fails the records are still
//! returned and the temp file stays for the next save to replace.
//!
//! Concurrent writers from separate processes race on the temp path; one
//! store per data file is assumed.

use super::codec;
use super::RecordStore;
use crate::error::{LoadError, PersistError};
use crate::record::Record;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the primary path to derive the temp path
pub const TMP_SUFFIX: &str = ".tmp";

/// Record store over a primary data file and its staging temp file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    /// Published data file
    path: PathBuf,
    /// Staging file renamed over `path` on save
    tmp_path: PathBuf,
}

impl FileStore {
    /// Create store for `path`, staging through `path` + `.tmp`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tmp_path = default_tmp_path(&path);
        Self { path, tmp_path }
    }

    /// Create store with an explicit temp path
    #[must_use]
    pub fn with_tmp_path(path: impl Into<PathBuf>, tmp_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            tmp_path: tmp_path.into(),
        }
    }

    /// Primary data file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Staging temp file
    #[inline]
    #[must_use]
    pub fn tmp_path(&self) -> &Path {
        &self.tmp_path
    }

    fn write_tmp(&self, content: &str) -> Result<(), PersistError> {
        let io_err = |e: io::Error| PersistError::io(&self.tmp_path, e);
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&self.tmp_path)
            .map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes()).map_err(io_err)?;
        let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
        file.sync_all().map_err(io_err)
    }

    fn publish(&self) -> Result<(), PersistError> {
        fs::rename(&self.tmp_path, &self.path).map_err(|e| PersistError::io(&self.path, e))?;
        sync_parent_directory(&self.path).map_err(|e| PersistError::io(&self.path, e))
    }

    fn read(&self, path: &Path) -> Result<Vec<Record>, LoadError> {
        let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
        Ok(codec::decode(&bytes))
    }
}

impl RecordStore for FileStore {
    fn load(&self) -> Result<Vec<Record>, LoadError> {
        if self.path.exists() {
            let records = self.read(&self.path)?;
            tracing::info!(path = %self.path.display(), count = records.len(), "loaded records");
            return Ok(records);
        }

        if !self.tmp_path.exists() {
            tracing::debug!(path = %self.path.display(), "no data file, starting empty");
            return Ok(Vec::new());
        }

        tracing::warn!(
            tmp = %self.tmp_path.display(),
            "primary data file missing, recovering from temp file"
        );
        let records = self.read(&self.tmp_path)?;
        match fs::rename(&self.tmp_path, &self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), count = records.len(), "promoted recovered temp file");
            }
            Err(e) => {
                tracing::warn!(
                    tmp = %self.tmp_path.display(),
                    error = %e,
                    "could not promote recovered temp file, keeping it in place"
                );
            }
        }
        Ok(records)
    }

    fn save<'a, I>(&self, records: I) -> Result<usize, PersistError>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut content = String::new();
        let mut count = 0;
        for record in records {
            codec::encode_into(record, &mut content)?;
            count += 1;
        }

        let result = self.write_tmp(&content).and_then(|()| self.publish());
        match &result {
            Ok(()) => tracing::info!(path = %self.path.display(), count, "saved records"),
            Err(e) => tracing::error!(error = %e, "save failed"),
        }
        result.map(|()| count)
    }
}

/// `path` with [`TMP_SUFFIX`] appended to its file name
#[must_use]
pub fn default_tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(TMP_SUFFIX);
    PathBuf::from(tmp)
}

fn sync_parent_directory(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            File::open(parent)?.sync_all()?;
        }
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
