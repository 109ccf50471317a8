//! Prefix index over string fields
//!
//! Provides [`PrefixIndex`], a hash map from every registered prefix to the
//! set of handles indexed under it.

use crate::prefix::prefixes;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::hash::Hash;

/// Prefix index mapping each prefix string to a set of handles
///
/// Handles are non-owning references into whatever collection owns the
/// indexed values (for the directory, the record key). The index never
/// resolves them itself.
///
/// Invariants:
/// - a handle inserted under field `F` is present in the set of every
///   non-empty prefix of `F`
/// - no prefix maps to an empty set; emptied entries are dropped
/// - the empty string is never a key
#[derive(Debug, Clone)]
pub struct PrefixIndex<H> {
    /// Prefix -> handles whose field starts with it
    entries: HashMap<String, IndexSet<H>>,
}

impl<H> PrefixIndex<H>
where
    H: Eq + Hash + Clone,
{
    /// Create empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `handle` under every prefix of `field`
    ///
    /// No-op for an empty field. Inserting the same pair twice is harmless.
    pub fn insert(&mut self, field: &str, handle: H) {
        for prefix in prefixes(field) {
            if let Some(set) = self.entries.get_mut(prefix) {
                set.insert(handle.clone());
            } else {
                let mut set = IndexSet::with_capacity(1);
                set.insert(handle.clone());
                self.entries.insert(prefix.to_owned(), set);
            }
        }
    }

    /// Remove `handle` from every prefix of `field`
    ///
    /// Prefix entries left empty are removed. Absent fields, prefixes or
    /// handles are skipped, so deleting twice is a no-op.
    ///
    /// Returns `true` if the handle was removed from at least one prefix.
    pub fn delete(&mut self, field: &str, handle: &H) -> bool {
        let mut removed = false;
        for prefix in prefixes(field) {
            let Some(set) = self.entries.get_mut(prefix) else {
                continue;
            };
            removed |= set.swap_remove(handle);
            if set.is_empty() {
                self.entries.remove(prefix);
            }
        }
        removed
    }

    /// Handles registered under exactly `prefix`
    ///
    /// Unknown and empty prefixes yield nothing. Iteration order is
    /// unspecified; callers needing a stable order sort the result.
    pub fn search<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a H> + 'a {
        self.entries.get(prefix).into_iter().flatten()
    }

    /// Number of handles registered under `prefix`
    #[inline]
    #[must_use]
    pub fn count(&self, prefix: &str) -> usize {
        self.entries.get(prefix).map_or(0, IndexSet::len)
    }

    /// Check if `prefix` has a live entry
    #[inline]
    #[must_use]
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.entries.contains_key(prefix)
    }

    /// Number of distinct prefixes currently registered
    #[inline]
    #[must_use]
    pub fn prefix_count(&self) -> usize {
        self.entries.len()
    }

    /// Check if index is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<H> Default for PrefixIndex<H>
where
    H: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted<'a>(hits: impl Iterator<Item = &'a String>) -> Vec<String> {
        let mut v: Vec<_> = hits.cloned().collect();
        v.sort();
        v
    }

    #[test]
    fn insert_registers_every_prefix() {
        let mut index = PrefixIndex::new();
        index.insert("138", "a".to_string());

        assert!(index.contains_prefix("1"));
        assert!(index.contains_prefix("13"));
        assert!(index.contains_prefix("138"));
        assert!(!index.contains_prefix("1380"));
        assert_eq!(index.prefix_count(), 3);
    }

    #[test]
    fn search_is_exact_prefix_lookup() {
        let mut index = PrefixIndex::new();
        index.insert("Alice", "1".to_string());
        index.insert("Alan", "2".to_string());
        index.insert("Bob", "3".to_string());

        assert_eq!(sorted(index.search("Al")), vec!["1", "2"]);
        assert_eq!(sorted(index.search("Ali")), vec!["1"]);
        assert_eq!(index.search("lice").count(), 0);
        assert_eq!(index.search("al").count(), 0);
    }

    #[test]
    fn empty_field_and_empty_prefix() {
        let mut index = PrefixIndex::new();
        index.insert("", "ghost".to_string());

        assert!(index.is_empty());
        assert!(!index.contains_prefix(""));
        assert_eq!(index.search("").count(), 0);
    }

    #[test]
    fn delete_drops_emptied_prefixes() {
        let mut index = PrefixIndex::new();
        index.insert("138", "a".to_string());
        index.insert("139", "b".to_string());

        assert!(index.delete("138", &"a".to_string()));

        assert!(!index.contains_prefix("138"));
        assert_eq!(index.count("13"), 1);
        assert_eq!(index.count("1"), 1);
        assert_eq!(index.prefix_count(), 3);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut index = PrefixIndex::new();
        index.insert("abc", "x".to_string());

        assert!(index.delete("abc", &"x".to_string()));
        assert!(!index.delete("abc", &"x".to_string()));
        assert!(!index.delete("zzz", &"x".to_string()));
        assert!(!index.delete("", &"x".to_string()));
        assert!(index.is_empty());
    }

    #[test]
    fn delete_only_touches_given_handle() {
        let mut index = PrefixIndex::new();
        index.insert("Ann", "1".to_string());
        index.insert("Ann", "2".to_string());

        index.delete("Ann", &"1".to_string());

        assert_eq!(sorted(index.search("Ann")), vec!["2"]);
    }

    #[test]
    fn multibyte_fields() {
        let mut index = PrefixIndex::new();
        index.insert("张三", "1".to_string());
        index.insert("张四", "2".to_string());
        index.insert("李四", "3".to_string());

        assert_eq!(index.count("张"), 2);
        assert_eq!(index.count("李"), 1);
        assert_eq!(index.count("王"), 0);
    }

    #[test]
    fn repeated_cycles_do_not_leak_prefixes() {
        let mut index = PrefixIndex::new();
        for round in 0..100 {
            let handle = format!("h{round}");
            index.insert("13800138000", handle.clone());
            index.delete("13800138000", &handle);
        }
        assert!(index.is_empty());
    }

    proptest! {
        #[test]
        fn prop_every_prefix_finds_handle(fields in prop::collection::vec("[a-c]{0,6}", 1..20)) {
            let mut index = PrefixIndex::new();
            for (i, field) in fields.iter().enumerate() {
                index.insert(field, i);
            }
            for (i, field) in fields.iter().enumerate() {
                for prefix in prefixes(field) {
                    prop_assert!(index.search(prefix).any(|h| *h == i));
                }
            }
        }

        #[test]
        fn prop_deleting_everything_empties_index(fields in prop::collection::vec("[a-c]{0,6}", 0..20)) {
            let mut index = PrefixIndex::new();
            for (i, field) in fields.iter().enumerate() {
                index.insert(field, i);
            }
            for (i, field) in fields.iter().enumerate() {
                index.delete(field, &i);
            }
            prop_assert!(index.is_empty());
        }
    }
}
