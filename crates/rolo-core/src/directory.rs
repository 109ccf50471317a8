//! Contact directory orchestrator
//!
//! [`Directory`] owns the authoritative [`OrderedCollection`] and two derived
//! [`PrefixIndex`]es (over names and over keys) and keeps them in lockstep.
//! Durability is delegated to a [`RecordStore`].
//!
//! Every public operation restores the index/collection agreement before it
//! returns. Save failures never roll back a mutation; they are reported in
//! the [`Outcome`].

use crate::collection::OrderedCollection;
use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, LoadError, PersistError};
use crate::persistence::{FileStore, RecordStore};
use crate::record::Record;
use rolo_index::PrefixIndex;
use std::fmt::{self, Display, Formatter};

/// What a mutating operation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Record inserted; `replaced` holds the record it overwrote
    Added {
        /// Previous record with the same key
        replaced: Option<Record>,
    },
    /// Record removed
    Deleted,
}

/// Whether the mutation reached the store
#[derive(Debug)]
pub enum Durability {
    /// Saved as part of the operation
    Persisted,
    /// Autosave off; only in memory until the next save
    Deferred,
    /// Save attempted and failed; the in-memory change stands
    Failed(PersistError),
}

/// Result of a successful add or delete
#[derive(Debug)]
pub struct Outcome {
    /// What happened
    pub action: Action,
    /// The record added or removed
    pub record: Record,
    /// Persistence status
    pub durability: Durability,
}

impl Outcome {
    /// True unless the save attempt failed
    #[inline]
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !matches!(self.durability, Durability::Failed(_))
    }

    /// Persistence error, if the save attempt failed
    #[inline]
    #[must_use]
    pub fn persist_error(&self) -> Option<&PersistError> {
        match &self.durability {
            Durability::Failed(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.action {
            Action::Added { replaced: None } => write!(f, "added: {}", self.record)?,
            Action::Added { replaced: Some(_) } => write!(f, "updated: {}", self.record)?,
            Action::Deleted => write!(f, "deleted: {}", self.record)?,
        }
        if let Durability::Failed(e) = &self.durability {
            write!(f, " (not saved: {e})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Persist {
    Auto,
    Skip,
}

/// In-memory contact directory with prefix search
#[derive(Debug)]
pub struct Directory<S = FileStore> {
    /// Authoritative record store, insertion ordered
    records: OrderedCollection,
    /// Name prefix -> keys
    by_name: PrefixIndex<String>,
    /// Key prefix -> keys
    by_key: PrefixIndex<String>,
    /// Durable backing
    store: S,
    /// Save after every mutation
    autosave: bool,
    /// Why the initial load fell back to an empty directory
    load_error: Option<LoadError>,
}

impl Directory<FileStore> {
    /// Open the file-backed directory described by `config`
    #[must_use]
    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::open(config.file_store(), config.autosave)
    }
}

impl<S: RecordStore> Directory<S> {
    /// Create an empty directory over `store` without loading from it
    #[must_use]
    pub fn new(store: S, autosave: bool) -> Self {
        Self {
            records: OrderedCollection::new(),
            by_name: PrefixIndex::new(),
            by_key: PrefixIndex::new(),
            store,
            autosave,
            load_error: None,
        }
    }

    /// Create a directory and populate it from `store`
    ///
    /// Loaded records are inserted without re-saving. Later duplicates of a
    /// key overwrite earlier ones. If the store cannot be read the directory
    /// starts empty; the failure is logged and kept in [`Self::load_error`].
    #[must_use]
    pub fn open(store: S, autosave: bool) -> Self {
        let mut directory = Self::new(store, autosave);
        match directory.store.load() {
            Ok(loaded) => {
                let total = loaded.len();
                let mut skipped = 0usize;
                for record in loaded {
                    if let Err(e) = directory.insert(record, Persist::Skip) {
                        tracing::warn!(error = %e, "skipping stored record");
                        skipped += 1;
                    }
                }
                tracing::debug!(total, skipped, live = directory.len(), "directory loaded");
            }
            Err(e) => {
                tracing::warn!(error = %e, "load failed, starting with an empty directory");
                directory.load_error = Some(e);
            }
        }
        directory
    }

    /// Add a record, replacing any live record with the same key
    ///
    /// The replaced record moves out of insertion order; the new one is
    /// appended at the end. An empty name is allowed but never matches a
    /// name search.
    ///
    /// # Errors
    /// Returns error if the record violates the field policy (empty key,
    /// `|` or line breaks); nothing changes in that case.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        key: impl Into<String>,
        note: impl Into<String>,
    ) -> Result<Outcome, DirectoryError> {
        self.insert(Record::new(name, key, note), Persist::Auto)
    }

    /// Delete the record with `key`
    ///
    /// # Errors
    /// Returns [`DirectoryError::NotFound`] if no record has this key; no
    /// state changes and no save is attempted.
    pub fn delete(&mut self, key: &str) -> Result<Outcome, DirectoryError> {
        if !self.records.contains_key(key) {
            return Err(DirectoryError::NotFound(key.to_owned()));
        }
        let record = self.detach(key)?;
        tracing::debug!(key = %record.key, "deleted record");

        let durability = self.persist(Persist::Auto);
        Ok(Outcome {
            action: Action::Deleted,
            record,
            durability,
        })
    }

    /// Records whose name starts with `prefix`, in insertion order
    #[must_use]
    pub fn find_by_name_prefix(&self, prefix: &str) -> Vec<&Record> {
        self.resolve(self.by_name.search(prefix))
    }

    /// Records whose key starts with `prefix`, in insertion order
    #[must_use]
    pub fn find_by_key_prefix(&self, prefix: &str) -> Vec<&Record> {
        self.resolve(self.by_key.search(prefix))
    }

    /// All records in insertion order
    #[must_use]
    pub fn list_all(&self) -> Vec<&Record> {
        self.records.iter().collect()
    }

    /// Iterate records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.iter()
    }

    /// Lookup record by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Record> {
        self.records.get(key)
    }

    /// Number of live records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if directory is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the full record set to the store
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    /// Returns error if the store could not persist the set
    pub fn save(&self) -> Result<usize, PersistError> {
        self.store.save(self.records.iter())
    }

    /// Backing store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check if mutations save automatically
    #[inline]
    #[must_use]
    pub fn autosave(&self) -> bool {
        self.autosave
    }

    /// Load failure that left the directory empty at open, if any
    ///
    /// Autosave would overwrite the unreadable source, so callers should
    /// surface this before mutating.
    #[inline]
    #[must_use]
    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    fn insert(&mut self, record: Record, persist: Persist) -> Result<Outcome, DirectoryError> {
        record.validate()?;

        let replaced = if self.records.contains_key(&record.key) {
            Some(self.detach(&record.key)?)
        } else {
            None
        };

        self.records.append(record.clone())?;
        self.by_name.insert(&record.name, record.key.clone());
        self.by_key.insert(&record.key, record.key.clone());
        tracing::debug!(key = %record.key, replaced = replaced.is_some(), "added record");

        let durability = self.persist(persist);
        Ok(Outcome {
            action: Action::Added { replaced },
            record,
            durability,
        })
    }

    /// Remove `key` from the collection and both indexes, without saving
    fn detach(&mut self, key: &str) -> Result<Record, DirectoryError> {
        let record = self.records.remove_by_key(key)?;
        self.by_name.delete(&record.name, &record.key);
        self.by_key.delete(&record.key, &record.key);
        Ok(record)
    }

    fn persist(&self, persist: Persist) -> Durability {
        if persist == Persist::Skip || !self.autosave {
            return Durability::Deferred;
        }
        match self.save() {
            Ok(_) => Durability::Persisted,
            Err(e) => Durability::Failed(e),
        }
    }

    fn resolve<'a>(&'a self, keys: impl Iterator<Item = &'a String>) -> Vec<&'a Record> {
        let mut hits: Vec<(usize, &Record)> = keys
            .filter_map(|key| Some((self.records.position(key)?, self.records.get(key)?)))
            .collect();
        hits.sort_unstable_by_key(|&(position, _)| position);
        hits.into_iter().map(|(_, record)| record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::persistence::MemoryStore;

    fn directory() -> Directory<MemoryStore> {
        Directory::new(MemoryStore::new(), true)
    }

    fn keys(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.key.clone()).collect()
    }

    #[test]
    fn add_then_find() {
        let mut dir = directory();
        let outcome = dir.add("Alice", "13800138000", "colleague").unwrap();

        assert!(outcome.is_ok());
        assert!(matches!(outcome.durability, Durability::Persisted));
        assert_eq!(outcome.action, Action::Added { replaced: None });
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get("13800138000").unwrap().name, "Alice");
        assert_eq!(dir.store().save_count(), 1);
    }

    #[test]
    fn open_keeps_load_error() {
        let store = MemoryStore::with_records(vec![Record::new("Alice", "1", "")]);
        store.set_fail_loads(true);

        let dir = Directory::open(store, true);

        assert!(dir.is_empty());
        assert!(matches!(dir.load_error(), Some(LoadError::Io { .. })));
    }

    #[test]
    fn successful_open_has_no_load_error() {
        let store = MemoryStore::with_records(vec![Record::new("Alice", "1", "")]);
        let dir = Directory::open(store, true);

        assert_eq!(dir.len(), 1);
        assert!(dir.load_error().is_none());
    }

    #[test]
    fn overwrite_replaces_and_moves_to_end() {
        let mut dir = directory();
        dir.add("Alice", "1", "").unwrap();
        dir.add("Bob", "2", "").unwrap();

        let outcome = dir.add("Alice2", "1", "family").unwrap();

        assert_eq!(
            outcome.action,
            Action::Added {
                replaced: Some(Record::new("Alice", "1", ""))
            }
        );
        assert_eq!(keys(&dir.list_all()), vec!["2", "1"]);
        assert!(dir.find_by_name_prefix("Alice2").len() == 1);
        assert_eq!(keys(&dir.find_by_name_prefix("Alice")), vec!["1"]);
        assert_eq!(dir.get("1").unwrap().note, "family");
    }

    #[test]
    fn overwrite_drops_stale_name_prefixes() {
        let mut dir = directory();
        dir.add("Zed", "1", "").unwrap();
        dir.add("Amy", "1", "").unwrap();

        assert!(dir.find_by_name_prefix("Z").is_empty());
        assert!(!dir.by_name.contains_prefix("Z"));
        assert_eq!(dir.find_by_name_prefix("A").len(), 1);
    }

    #[test]
    fn delete_unknown_key_changes_nothing() {
        let mut dir = directory();
        dir.add("Alice", "1", "").unwrap();

        let err = dir.delete("404").unwrap_err();

        assert_eq!(err, DirectoryError::NotFound("404".into()));
        assert_eq!(dir.len(), 1);
        assert_eq!(dir.store().save_count(), 1);
    }

    #[test]
    fn delete_clears_indexes() {
        let mut dir = directory();
        dir.add("Alice", "13800138000", "").unwrap();

        let outcome = dir.delete("13800138000").unwrap();

        assert_eq!(outcome.action, Action::Deleted);
        assert!(dir.is_empty());
        assert!(dir.by_name.is_empty());
        assert!(dir.by_key.is_empty());
    }

    #[test]
    fn empty_name_is_not_searchable() {
        let mut dir = directory();
        dir.add("", "1", "").unwrap();

        assert_eq!(dir.len(), 1);
        assert!(dir.find_by_name_prefix("").is_empty());
        assert!(dir.by_name.is_empty());
        assert_eq!(dir.find_by_key_prefix("1").len(), 1);
    }

    #[test]
    fn invalid_record_rejected_without_change() {
        let mut dir = directory();

        assert_eq!(
            dir.add("Alice", "", "").unwrap_err(),
            DirectoryError::InvalidRecord(RecordError::EmptyKey)
        );
        assert!(matches!(
            dir.add("Alice", "1", "a|b"),
            Err(DirectoryError::InvalidRecord(RecordError::ReservedCharacter { .. }))
        ));
        assert!(dir.is_empty());
        assert_eq!(dir.store().save_count(), 0);
    }

    #[test]
    fn search_results_follow_insertion_order() {
        let mut dir = directory();
        for (name, key) in [("Ann", "5"), ("Andy", "3"), ("Bea", "4"), ("Anya", "1")] {
            dir.add(name, key, "").unwrap();
        }

        assert_eq!(keys(&dir.find_by_name_prefix("An")), vec!["5", "3", "1"]);
        dir.add("Ann", "5", "again").unwrap();
        assert_eq!(keys(&dir.find_by_name_prefix("An")), vec!["3", "1", "5"]);
    }

    #[test]
    fn save_failure_keeps_mutation() {
        let mut dir = directory();
        dir.store().set_fail_saves(true);

        let outcome = dir.add("Alice", "1", "").unwrap();

        assert!(!outcome.is_ok());
        assert!(matches!(outcome.persist_error(), Some(PersistError::Io { .. })));
        assert!(outcome.to_string().contains("not saved"));
        assert_eq!(dir.len(), 1);

        let outcome = dir.delete("1").unwrap();
        assert!(!outcome.is_ok());
        assert!(dir.is_empty());
    }

    #[test]
    fn autosave_off_defers() {
        let mut dir = Directory::new(MemoryStore::new(), false);
        let outcome = dir.add("Alice", "1", "").unwrap();

        assert!(matches!(outcome.durability, Durability::Deferred));
        assert_eq!(dir.store().save_count(), 0);

        assert_eq!(dir.save().unwrap(), 1);
        assert_eq!(dir.store().records(), vec![Record::new("Alice", "1", "")]);
    }

    #[test]
    fn open_loads_without_saving() {
        let store = MemoryStore::with_records(vec![
            Record::new("Alice", "1", ""),
            Record::new("Bob", "2", ""),
            Record::new("Alice2", "1", "later"),
            Record::new("Bad", "", ""),
        ]);

        let dir = Directory::open(store, true);

        assert_eq!(keys(&dir.list_all()), vec!["2", "1"]);
        assert_eq!(dir.get("1").unwrap().name, "Alice2");
        assert_eq!(dir.store().save_count(), 0);
    }

    #[test]
    fn outcome_messages() {
        let mut dir = directory();
        let added = dir.add("Alice", "1", "x").unwrap();
        let updated = dir.add("Alice", "1", "y").unwrap();
        let deleted = dir.delete("1").unwrap();

        assert_eq!(added.to_string(), "added: Alice | 1 | note: x");
        assert_eq!(updated.to_string(), "updated: Alice | 1 | note: y");
        assert_eq!(deleted.to_string(), "deleted: Alice | 1 | note: y");
    }
}
