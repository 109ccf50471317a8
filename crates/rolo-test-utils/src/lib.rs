//! Testing utilities for Rolodex workspace
//!
//! Shared fixtures: scratch data directories and sample contacts.

#![allow(missing_docs)]

use rolo_core::{Directory, DirectoryConfig, FileStore, Record};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory holding one data file; removed on drop
pub struct ScratchData {
    dir: TempDir,
}

impl ScratchData {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_path(&self) -> PathBuf {
        self.dir.path().join("address_book.dat")
    }

    pub fn tmp_path(&self) -> PathBuf {
        self.dir.path().join("address_book.dat.tmp")
    }

    pub fn config(&self) -> DirectoryConfig {
        DirectoryConfig::new().with_data_path(self.data_path())
    }

    pub fn store(&self) -> FileStore {
        self.config().file_store()
    }

    /// Fresh directory opened from the data file, as after a restart
    pub fn open(&self) -> Directory<FileStore> {
        Directory::from_config(&self.config())
    }

    pub fn write_primary(&self, content: &str) {
        std::fs::write(self.data_path(), content).unwrap();
    }

    pub fn write_tmp(&self, content: &str) {
        std::fs::write(self.tmp_path(), content).unwrap();
    }

    pub fn read_primary(&self) -> String {
        std::fs::read_to_string(self.data_path()).unwrap()
    }
}

impl Default for ScratchData {
    fn default() -> Self {
        Self::new()
    }
}

pub fn alice() -> Record {
    Record::new("Alice", "13800138000", "colleague")
}

pub fn bob() -> Record {
    Record::new("Bob", "13900139000", "")
}

/// Contacts with shared name and phone prefixes
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new("张三", "13800138000", "同事"),
        Record::new("张四", "13800138001", ""),
        Record::new("李四", "13900139000", "家人"),
        Record::new("王五", "13700137000", ""),
        Record::new("赵六", "13700137001", "朋友"),
    ]
}

pub fn populate<S: rolo_core::RecordStore>(dir: &mut Directory<S>, records: &[Record]) {
    for r in records {
        dir.add(r.name.clone(), r.key.clone(), r.note.clone()).unwrap();
    }
}

pub fn keys_of(records: &[&Record]) -> Vec<String> {
    records.iter().map(|r| r.key.clone()).collect()
}
