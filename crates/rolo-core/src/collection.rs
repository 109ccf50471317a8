//! Insertion-ordered record collection
//!
//! Provides [`OrderedCollection`]: a slot arena in insertion order plus a
//! key -> slot map, giving O(1) append, lookup and removal.

use crate::error::CollectionError;
use crate::record::Record;
use std::collections::HashMap;

/// Below this many slots tombstones are never compacted
const COMPACT_MIN_SLOTS: usize = 32;

/// Records in stable insertion order, addressable by key
///
/// Removal leaves a tombstone in the arena; once tombstones outnumber live
/// records the arena is compacted, which keeps relative order.
#[derive(Debug, Clone, Default)]
pub struct OrderedCollection {
    /// Insertion-ordered slots, `None` for removed records
    slots: Vec<Option<Record>>,
    /// Key -> slot in `slots`
    positions: HashMap<String, usize>,
}

impl OrderedCollection {
    /// Create empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the end of the order
    ///
    /// # Errors
    /// Returns error if the key is already present; the caller must remove
    /// the old record first.
    pub fn append(&mut self, record: Record) -> Result<(), CollectionError> {
        if self.positions.contains_key(&record.key) {
            return Err(CollectionError::DuplicateKey(record.key));
        }
        self.positions.insert(record.key.clone(), self.slots.len());
        self.slots.push(Some(record));
        Ok(())
    }

    /// Detach and return the record with `key`
    ///
    /// # Errors
    /// Returns error if no record has this key
    pub fn remove_by_key(&mut self, key: &str) -> Result<Record, CollectionError> {
        let slot = self
            .positions
            .remove(key)
            .ok_or_else(|| CollectionError::NotFound(key.to_owned()))?;
        let record = self.slots[slot]
            .take()
            .ok_or_else(|| CollectionError::NotFound(key.to_owned()))?;
        self.maybe_compact();
        Ok(record)
    }

    /// Lookup record by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.positions
            .get(key)
            .and_then(|&slot| self.slots[slot].as_ref())
    }

    /// Check if key is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Rank of `key` in insertion order
    ///
    /// Only meaningful for comparing records against each other; ranks are
    /// not contiguous and change when the arena compacts.
    #[inline]
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Fresh pass over live records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.slots.iter().flatten()
    }

    /// Number of live records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if collection is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn maybe_compact(&mut self) {
        let live = self.positions.len();
        let dead = self.slots.len() - live;
        if self.slots.len() < COMPACT_MIN_SLOTS || dead <= live {
            return;
        }

        self.slots.retain(Option::is_some);
        for (slot, record) in self.slots.iter().enumerate() {
            if let Some(record) = record {
                if let Some(pos) = self.positions.get_mut(&record.key) {
                    *pos = slot;
                }
            }
        }
        tracing::trace!(live, reclaimed = dead, "compacted collection");
    }
}

impl<'a> IntoIterator for &'a OrderedCollection {
    type Item = &'a Record;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Option<Record>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter().flatten()
    }
}
