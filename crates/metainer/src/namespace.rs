//! The host's plain attribute namespace.
//!
//! Holds mounted values only, never metadata. Reads are public; writes go
//! through [`Namespace::set_raw`], which is reserved for the mount algorithm
//! so that a mount can never re-enter the metadata layer.

use crate::value::MetaValue;
use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Namespace {
    slots: IndexMap<String, Arc<MetaValue>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct lookup, bypassing any interception.
    pub fn get_raw(&self, name: &str) -> Option<&Arc<MetaValue>> {
        self.slots.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot names in first-mount order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Direct write, bypassing any interception. Overwrites in place.
    pub(crate) fn set_raw(&mut self, name: &str, value: Arc<MetaValue>) {
        self.slots.insert(name.to_string(), value);
    }

    pub(crate) fn remove_raw(&mut self, name: &str) -> Option<Arc<MetaValue>> {
        self.slots.shift_remove(name)
    }
}
