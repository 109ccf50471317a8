//! Rolodex Core
//!
//! In-memory contact directory with prefix search and atomic single-file
//! persistence.
//!
//! # Overview
//!
//! The core provides:
//! - **Record**: one contact (name, unique key, note)
//! - **OrderedCollection**: insertion-ordered records with O(1) removal by key
//! - **Directory**: collection plus name and key prefix indexes, kept in lockstep
//! - **RecordStore**: persistence seam, with [`FileStore`] (write temp, then
//!   rename) and [`MemoryStore`]
//! - **paginate**: page slicing for result lists
//!
//! # Example
//!
//! ```rust
//! use rolo_core::{Directory, MemoryStore};
//!
//! let mut dir = Directory::new(MemoryStore::new(), true);
//! dir.add("Alice", "13800138000", "colleague").unwrap();
//! dir.add("Bob", "13900139000", "").unwrap();
//!
//! let hits = dir.find_by_key_prefix("138");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "Alice");
//! ```

#![warn(missing_docs)]

pub mod collection;
pub mod config;
pub mod directory;
pub mod error;
pub mod pagination;
pub mod persistence;
pub mod record;

// Re-exports
pub use collection::OrderedCollection;
pub use config::DirectoryConfig;
pub use directory::{Action, Directory, Durability, Outcome};
pub use error::{CollectionError, ConfigError, DirectoryError, LoadError, PersistError, RecordError};
pub use pagination::{paginate, Page};
pub use persistence::{FileStore, MemoryStore, RecordStore};
pub use record::Record;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for directory operations
    pub use crate::{
        paginate, Directory, DirectoryConfig, DirectoryError, Durability, FileStore, Outcome,
        Record, RecordStore,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
