//! Record persistence
//!
//! Provides the [`RecordStore`] seam between the directory and durable
//! storage:
//! - [`FileStore`]: line-format file with write-temp-then-rename publishing
//! - [`MemoryStore`]: in-process store with failure injection
//!
//! Every save rewrites the full record set.

pub mod codec;
pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{LoadError, PersistError};
use crate::record::Record;

/// Backing store for a directory's records
pub trait RecordStore {
    /// Read the persisted record set in stored order
    ///
    /// A store with nothing persisted yet returns an empty list.
    ///
    /// # Errors
    /// Returns error if existing data cannot be read
    fn load(&self) -> Result<Vec<Record>, LoadError>;

    /// Replace the persisted record set with `records`
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    /// Returns error if the set could not be made durable; previously
    /// published data stays intact unless publishing already happened.
    fn save<'a, I>(&self, records: I) -> Result<usize, PersistError>
    where
        I: IntoIterator<Item = &'a Record>;
}
