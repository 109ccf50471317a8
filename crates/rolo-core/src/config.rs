//! Directory configuration
//!
//! Defaults, builder-style overrides and TOML loading.
//!
//! ```toml
//! data_path = "contacts/address_book.dat"
//! tmp_path = "contacts/address_book.dat.staging"   # optional
//! autosave = true
//! page_size = 10
//! ```

use crate::error::ConfigError;
use crate::persistence::file::default_tmp_path;
use crate::persistence::FileStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default primary data file
pub const DEFAULT_DATA_PATH: &str = "address_book.dat";

/// Default page size for paginated listings
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Directory configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Primary data file
    pub data_path: PathBuf,
    /// Staging file; `data_path` + `.tmp` when unset
    pub tmp_path: Option<PathBuf>,
    /// Save after every add/delete
    pub autosave: bool,
    /// Records per page in listings
    pub page_size: usize,
}

impl DirectoryConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With primary data file
    #[inline]
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// With explicit staging file
    #[inline]
    #[must_use]
    pub fn with_tmp_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tmp_path = Some(path.into());
        self
    }

    /// With autosave on or off
    #[inline]
    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// With page size (zero is raised to one)
    #[inline]
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Resolved staging file
    #[must_use]
    pub fn tmp_path(&self) -> PathBuf {
        self.tmp_path
            .clone()
            .unwrap_or_else(|| default_tmp_path(&self.data_path))
    }

    /// File store over the configured paths
    #[must_use]
    pub fn file_store(&self) -> FileStore {
        FileStore::with_tmp_path(&self.data_path, self.tmp_path())
    }

    /// Parse configuration from TOML; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns error on invalid TOML or unknown keys
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        let page_size = config.page_size;
        Ok(config.with_page_size(page_size))
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            tmp_path: None,
            autosave: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
