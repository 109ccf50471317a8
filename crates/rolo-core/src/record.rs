//! Contact record
//!
//! Provides [`Record`], one directory entry identified by its unique key.

use crate::error::RecordError;
use std::fmt::{self, Display, Formatter};

/// Field separator of the persisted line format
pub const SEPARATOR: char = '|';

/// Characters no field may contain
const RESERVED: [char; 3] = [SEPARATOR, '\n', '\r'];

/// One contact entry
///
/// `key` (a phone number in practice) identifies the record; a directory
/// holds at most one live record per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// Display name, may be empty
    pub name: String,
    /// Unique key
    pub key: String,
    /// Free-text note, may be empty
    pub note: String,
}

impl Record {
    /// Create a record
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            note: note.into(),
        }
    }

    /// Check the field policy
    ///
    /// # Errors
    /// Returns error if the key is empty or any field contains `|` or a
    /// line break.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.key.is_empty() {
            return Err(RecordError::EmptyKey);
        }
        for (field, value) in [("name", &self.name), ("key", &self.key), ("note", &self.note)] {
            if let Some(ch) = value.chars().find(|c| RESERVED.contains(c)) {
                return Err(RecordError::ReservedCharacter { field, ch });
            }
        }
        Ok(())
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | note: {}", self.name, self.key, self.note)
    }
}
