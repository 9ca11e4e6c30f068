//! # Ordered Record Container
//!
//! [`RecordList`] keeps every [`MetadataRecord`] a host has produced, in write
//! order. Records are reachable two ways:
//!
//! 1. **Position**: the n-th write, via [`RecordList::at`] / [`RecordList::get`].
//! 2. **Name**: the value of the record's name field, via [`RecordList::lookup`].
//!
//! ## Append-Only
//!
//! Writing the same name twice does not update the earlier record; both
//! records coexist. [`RecordList::lookup`] resolves to the first one, and
//! [`RecordList::latest`] / [`RecordList::lookup_all`] cover the other cases.
//!
//! ## The Name Index
//!
//! The name index is not maintained on append. It is caught up lazily on the
//! next lookup, indexing only the records appended since the previous
//! catch-up, so both append and lookup stay O(1) amortized.
//!
//! ## Shared Access
//!
//! The container is append-only through `&self` (interior mutability, since
//! each container belongs to a single host on a single thread). Records are
//! handed out as `Arc<MetadataRecord>`, so handles stay valid across later
//! appends, and an iteration in progress never observes records appended
//! after it started.

use crate::error::{MetainerError, Result};
use crate::record::MetadataRecord;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Arc;

/// Name field used when none is configured.
pub const DEFAULT_NAME_KEY: &str = "name";

#[derive(Debug)]
pub struct RecordList {
    name_key: String,
    records: RefCell<Vec<Arc<MetadataRecord>>>,
    by_name: RefCell<HashMap<String, usize>>,
    // Number of leading records already folded into `by_name`.
    indexed: Cell<usize>,
}

impl Default for RecordList {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_KEY)
    }
}

impl RecordList {
    pub fn new(name_key: impl Into<String>) -> Self {
        Self {
            name_key: name_key.into(),
            records: RefCell::new(Vec::new()),
            by_name: RefCell::new(HashMap::new()),
            indexed: Cell::new(0),
        }
    }

    /// Create a container holding `record` as its first entry.
    pub fn with_record(name_key: impl Into<String>, record: MetadataRecord) -> Self {
        let list = Self::new(name_key);
        list.append(record);
        list
    }

    /// The field records are looked up by.
    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a record at the end. Returns its position.
    pub fn append(&self, record: MetadataRecord) -> usize {
        let mut records = self.records.borrow_mut();
        records.push(Arc::new(record));
        records.len() - 1
    }

    /// Positional access.
    pub fn get(&self, index: usize) -> Option<Arc<MetadataRecord>> {
        self.records.borrow().get(index).cloned()
    }

    /// Positional access that fails when `index` is out of bounds.
    pub fn at(&self, index: usize) -> Result<Arc<MetadataRecord>> {
        let records = self.records.borrow();
        records
            .get(index)
            .cloned()
            .ok_or(MetainerError::IndexOutOfRange {
                index,
                len: records.len(),
            })
    }

    /// The first record, in insertion order, whose name field equals `name`.
    pub fn lookup(&self, name: &str) -> Option<Arc<MetadataRecord>> {
        self.catch_up();
        let position = *self.by_name.borrow().get(name)?;
        self.get(position)
    }

    /// Whether any record carries `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.catch_up();
        self.by_name.borrow().contains_key(name)
    }

    /// The most recent record whose name field equals `name`.
    pub fn latest(&self, name: &str) -> Option<Arc<MetadataRecord>> {
        self.records
            .borrow()
            .iter()
            .rev()
            .find(|record| record.name(&self.name_key) == Some(name))
            .cloned()
    }

    /// Every record whose name field equals `name`, oldest first.
    pub fn lookup_all(&self, name: &str) -> Vec<Arc<MetadataRecord>> {
        self.records
            .borrow()
            .iter()
            .filter(|record| record.name(&self.name_key) == Some(name))
            .cloned()
            .collect()
    }

    /// Iterate over the records present right now, in insertion order.
    pub fn iter(&self) -> Records<'_> {
        Records {
            list: self,
            next: 0,
            end: self.len(),
        }
    }

    fn catch_up(&self) {
        let records = self.records.borrow();
        let start = self.indexed.get();
        if start == records.len() {
            return;
        }

        let mut by_name = self.by_name.borrow_mut();
        for (position, record) in records.iter().enumerate().skip(start) {
            // Records without a text name are reachable by position only.
            if let Some(name) = record.name(&self.name_key) {
                by_name.entry(name.to_string()).or_insert(position);
            }
        }
        self.indexed.set(records.len());
    }
}

/// Iterator over a [`RecordList`], bounded by its length at creation.
pub struct Records<'a> {
    list: &'a RecordList,
    next: usize,
    end: usize,
}

impl Iterator for Records<'_> {
    type Item = Arc<MetadataRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let record = self.list.get(self.next);
        self.next += 1;
        record
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Records<'_> {}

impl<'a> IntoIterator for &'a RecordList {
    type Item = Arc<MetadataRecord>;
    type IntoIter = Records<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::value::MetaValue;

    fn record(name: &str, value: i64) -> MetadataRecord {
        MetadataRecord::named(DEFAULT_NAME_KEY, name, value)
    }

    fn names(list: &RecordList) -> Vec<String> {
        list.iter()
            .filter_map(|r| r.name(DEFAULT_NAME_KEY).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_new_is_empty() {
        let list = RecordList::default();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().count(), 0);
        assert!(list.lookup("x").is_none());
    }

    #[test]
    fn test_with_record_seeds_one_entry() {
        let list = RecordList::with_record(DEFAULT_NAME_KEY, record("x", 1));
        assert_eq!(list.len(), 1);
        assert_eq!(list.lookup("x").unwrap().value(), &MetaValue::Int(1));
    }

    #[test]
    fn test_iteration_preserves_append_order() {
        let list = RecordList::default();
        for (i, name) in ["c", "a", "b", "a"].iter().enumerate() {
            assert_eq!(list.append(record(name, i as i64)), i);
        }

        assert_eq!(names(&list), vec!["c", "a", "b", "a"]);
        let values: Vec<MetaValue> = list.iter().map(|r| r.value().clone()).collect();
        assert_eq!(
            values,
            vec![
                MetaValue::Int(0),
                MetaValue::Int(1),
                MetaValue::Int(2),
                MetaValue::Int(3)
            ]
        );
        for i in 0..list.len() {
            assert_eq!(list.at(i).unwrap().value(), &MetaValue::Int(i as i64));
        }
    }

    #[test]
    fn test_iteration_is_restartable() {
        let list = RecordList::default();
        list.append(record("a", 1));
        list.append(record("b", 2));

        assert_eq!(names(&list), names(&list));
        let mut count = 0;
        for _ in &list {
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_append_during_iteration_is_not_observed() {
        let list = RecordList::default();
        list.append(record("a", 1));
        list.append(record("b", 2));

        let mut seen = Vec::new();
        for r in &list {
            seen.push(r.name(DEFAULT_NAME_KEY).unwrap().to_string());
            list.append(record("late", 0));
        }

        assert_eq!(seen, vec!["a", "b"]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_at_out_of_range() {
        let list = RecordList::default();
        list.append(record("a", 1));

        match list.at(1) {
            Err(MetainerError::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 1);
                assert_eq!(len, 1);
            }
            other => panic!("Expected IndexOutOfRange, got {:?}", other),
        }
        assert!(list.get(5).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_lookup_returns_first_match() {
        let list = RecordList::default();
        list.append(record("x", 1));
        list.append(record("y", 2));
        list.append(record("x", 3));

        assert_eq!(list.lookup("x").unwrap().value(), &MetaValue::Int(1));
        assert_eq!(list.latest("x").unwrap().value(), &MetaValue::Int(3));
        assert_eq!(list.lookup_all("x").len(), 2);
        assert!(list.lookup("z").is_none());
        assert!(list.latest("z").is_none());
    }

    #[test]
    fn test_lookup_sees_records_appended_after_previous_lookup() {
        let list = RecordList::default();
        list.append(record("x", 1));
        assert!(list.lookup("y").is_none());

        list.append(record("y", 2));
        list.append(record("x", 3));

        assert_eq!(list.lookup("y").unwrap().value(), &MetaValue::Int(2));
        assert_eq!(list.lookup("x").unwrap().value(), &MetaValue::Int(1));
        assert!(list.contains("y"));
        assert!(!list.contains("z"));
    }

    #[test]
    fn test_custom_name_key() {
        let list = RecordList::new("label");
        list.append(MetadataRecord::new(1, fields! { "label" => "x" }));
        list.append(MetadataRecord::new(2, fields! { "name" => "y" }));

        assert_eq!(list.name_key(), "label");
        assert!(list.lookup("x").is_some());
        assert!(list.lookup("y").is_none());
        assert_eq!(list.at(1).unwrap().value(), &MetaValue::Int(2));
    }

    #[test]
    fn test_record_handles_survive_appends() {
        let list = RecordList::default();
        list.append(record("a", 1));
        let first = list.at(0).unwrap();

        for i in 0..100 {
            list.append(record("filler", i));
        }

        assert!(Arc::ptr_eq(&first, &list.at(0).unwrap()));
        assert_eq!(first.value(), &MetaValue::Int(1));
    }
}
