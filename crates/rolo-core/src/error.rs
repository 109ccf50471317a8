//! Error types for the contact directory
//!
//! Provides error handling for:
//! - Record field policy (empty key, reserved characters)
//! - Collection membership (missing or duplicate key)
//! - Directory operations
//! - Persistence (save and load) and configuration files

use std::path::PathBuf;

/// Record field policy violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// Key must be non-empty
    #[error("record key must not be empty")]
    EmptyKey,

    /// Field contains the separator or a line break
    #[error("{field} contains reserved character {ch:?}")]
    ReservedCharacter {
        /// Offending field name
        field: &'static str,
        /// Offending character
        ch: char,
    },
}

/// Ordered collection errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// No record with this key
    #[error("no record with key {0}")]
    NotFound(String),

    /// Append without clearing the existing key first
    #[error("duplicate key {0}")]
    DuplicateKey(String),
}

/// Directory operation errors
///
/// Persistence failures are not here: they never undo an operation and are
/// reported through [`crate::Durability`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// Delete of an unknown key
    #[error("key {0} does not exist")]
    NotFound(String),

    /// Record rejected by the field policy
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    /// Collection invariant violated
    #[error("collection error: {0}")]
    Collection(#[from] CollectionError),
}

/// Errors while saving the record set
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// IO error writing, syncing or publishing a file
    #[error("io error writing {path}: {source}")]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// Record cannot be represented in the line format
    #[error("record {key} cannot be encoded: {source}")]
    Unencodable {
        /// Key of the offending record
        key: String,
        /// Field policy violation
        #[source]
        source: RecordError,
    },
}

impl PersistError {
    /// Create IO error for path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while loading the record set
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error reading, decoding or promoting a file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Create IO error for path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("io error reading config {path}: {source}")]
    Io {
        /// Config file path
        path: PathBuf,
        /// Underlying cause
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::DirectoryConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
