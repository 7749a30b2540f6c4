//! In-memory record store
//!
//! The store is the single source of truth while the process runs. It does no
//! locking of its own; the link service serializes access to it.

use std::collections::HashMap;

use crate::model::Record;

#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: HashMap<String, Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    /// Inserts or overwrites the record stored under `id`.
    pub fn put(&mut self, id: String, record: Record) {
        self.records.insert(id, record);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Iterates over every entry in map order (unspecified, not stable).
    pub fn snapshot(&self) -> impl Iterator<Item = (&String, &Record)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Record> {
        self.records.get_mut(id)
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let records = iter
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self { records }
    }
}
