//! In-memory record store
//!
//! Ordered collection of records scoped to a single connection.
//! The phone number is the lookup key and is kept unique on insert.

use super::models::{Record, RecordPatch};
use crate::error::{AppError, Result};

/// Ordered, in-memory record collection
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, rejecting a phone key that is already present
    pub fn insert(&mut self, record: Record) -> Result<Record> {
        if self.get(&record.phone).is_some() {
            return Err(AppError::DuplicateRecord(record.phone));
        }

        self.records.push(record.clone());
        tracing::debug!("Inserted record: {}", record.phone);
        Ok(record)
    }

    /// Merge `patch` into the record with this phone and return the result
    pub fn update(&mut self, phone: &str, patch: RecordPatch) -> Result<Record> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.phone == phone)
            .ok_or_else(|| AppError::RecordNotFound(phone.to_string()))?;

        record.apply(patch);
        tracing::debug!("Updated record: {}", phone);
        Ok(record.clone())
    }

    /// Remove every record with this phone, returning how many were removed
    pub fn delete(&mut self, phone: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.phone != phone);
        let removed = before - self.records.len();

        tracing::debug!("Deleted {} record(s) for: {}", removed, phone);
        removed
    }

    /// Snapshot of all records in insertion order
    pub fn list_all(&self) -> Vec<Record> {
        self.records.clone()
    }

    pub fn get(&self, phone: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.phone == phone)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(records: &[(&str, &str)]) -> RecordStore {
        let mut store = RecordStore::new();
        for (name, phone) in records {
            store.insert(Record::new(*name, *phone)).unwrap();
        }
        store
    }

    #[test]
    fn test_list_all_preserves_insertion_order() {
        let store = store_with(&[("C", "3"), ("A", "1"), ("B", "2")]);

        let phones: Vec<_> = store.list_all().into_iter().map(|r| r.phone).collect();

        assert_eq!(phones, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_list_all_returns_snapshot() {
        let store = store_with(&[("A", "1")]);

        let mut snapshot = store.list_all();
        snapshot.clear();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_phone() {
        let mut store = store_with(&[("A", "1")]);

        let err = store.insert(Record::new("Other", "1")).unwrap_err();

        assert!(matches!(err, AppError::DuplicateRecord(ref p) if p == "1"));
        assert_eq!(store.list_all(), vec![Record::new("A", "1")]);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = store_with(&[("A", "1")]);

        let updated = store
            .update(
                "1",
                RecordPatch {
                    full_name: None,
                    note: Some("x".to_string()),
                },
            )
            .unwrap();

        assert_eq!(updated, Record::new("A", "1").with_note("x"));
        assert_eq!(store.list_all(), vec![updated]);
    }

    #[test]
    fn test_update_missing_leaves_store_unchanged() {
        let mut store = store_with(&[("A", "1")]);

        let err = store
            .update(
                "9",
                RecordPatch {
                    full_name: Some("Z".to_string()),
                    note: None,
                },
            )
            .unwrap_err();

        assert!(matches!(err, AppError::RecordNotFound(_)));
        assert_eq!(store.list_all(), vec![Record::new("A", "1")]);
    }

    #[test]
    fn test_delete_removes_matching_and_reports_count() {
        let mut store = store_with(&[("A", "1"), ("B", "2")]);

        assert_eq!(store.delete("1"), 1);
        assert!(store.get("1").is_none());
        assert_eq!(store.list_all(), vec![Record::new("B", "2")]);
    }

    #[test]
    fn test_delete_missing_returns_zero() {
        let mut store = store_with(&[("A", "1")]);

        assert_eq!(store.delete("missing"), 0);
        assert_eq!(store.len(), 1);
    }
}
