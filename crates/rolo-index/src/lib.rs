//! Rolodex Prefix Index
//!
//! Hash-based prefix index: every non-empty prefix of an indexed field maps
//! to the set of handles whose field starts with it.
//!
//! # Overview
//!
//! The index provides:
//! - **PrefixIndex**: O(len(field)) insert/delete, O(1) average lookup
//! - **prefixes**: the `char`-boundary prefixes a field is registered under
//!
//! # Example
//!
//! ```rust
//! use rolo_index::PrefixIndex;
//!
//! let mut index = PrefixIndex::new();
//! index.insert("13800138000", "alice".to_string());
//! index.insert("13900139000", "bob".to_string());
//!
//! let hits: Vec<_> = index.search("138").collect();
//! assert_eq!(hits, vec![&"alice".to_string()]);
//! assert_eq!(index.search("13").count(), 2);
//! ```

#![warn(missing_docs)]

pub mod index;
pub mod prefix;

// Re-exports
pub use index::PrefixIndex;
pub use prefix::prefixes;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
