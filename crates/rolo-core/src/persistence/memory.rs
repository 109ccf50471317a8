//! In-memory record store
//!
//! Keeps the last saved set in process. Used for ephemeral directories and
//! for exercising save-failure paths without a real filesystem.

use super::RecordStore;
use crate::error::{LoadError, PersistError};
use crate::record::Record;
use std::cell::{Cell, RefCell};
use std::io;

/// Record store that never leaves the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<Record>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
    fail_loads: Cell<bool>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store preloaded with `records`
    #[must_use]
    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Make subsequent loads fail (or succeed again)
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.set(fail);
    }

    /// Snapshot of the last successfully saved set
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    /// Number of successful saves
    #[inline]
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Vec<Record>, LoadError> {
        if self.fail_loads.get() {
            return Err(LoadError::io(
                "<memory>",
                io::Error::new(io::ErrorKind::Other, "injected load failure"),
            ));
        }
        Ok(self.records())
    }

    fn save<'a, I>(&self, records: I) -> Result<usize, PersistError>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        if self.fail_saves.get() {
            return Err(PersistError::io(
                "<memory>",
                io::Error::new(io::ErrorKind::Other, "injected save failure"),
            ));
        }

        let mut snapshot = Vec::new();
        for record in records {
            record.validate().map_err(|source| PersistError::Unencodable {
                key: record.key.clone(),
                source,
            })?;
            snapshot.push(record.clone());
        }

        let count = snapshot.len();
        *self.records.borrow_mut() = snapshot;
        self.saves.set(self.saves.get() + 1);
        Ok(count)
    }
}
