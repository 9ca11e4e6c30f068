//! Metadata records.
//!
//! A [`MetadataRecord`] is what one attribute write leaves behind: the value
//! that was written and every metadata field supplied with it, including the
//! name field the record is looked up by.

use crate::value::MetaValue;
use indexmap::IndexMap;
use std::sync::Arc;

/// Metadata fields of a record, keyed by field name.
///
/// Keys are unique. Iteration follows insertion order.
pub type Fields = IndexMap<String, MetaValue>;

/// Build a [`Fields`] map from `key => value` pairs.
///
/// Values go through `MetaValue::from`, so literals work directly:
///
/// ```
/// use metainer::{fields, MetaValue};
///
/// let fields = fields! { "alias" => "y", "hidden" => true };
/// assert_eq!(fields["alias"], MetaValue::from("y"));
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(
                ::std::string::String::from($key),
                $crate::MetaValue::from($value),
            );
        )+
        fields
    }};
}

/// A value plus the metadata fields recorded with it.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    value: Arc<MetaValue>,
    fields: Fields,
}

impl MetadataRecord {
    pub fn new(value: impl Into<MetaValue>, fields: Fields) -> Self {
        Self::from_shared(Arc::new(value.into()), fields)
    }

    /// Create a record around a value that is already shared elsewhere
    /// (e.g. with the host namespace).
    pub fn from_shared(value: Arc<MetaValue>, fields: Fields) -> Self {
        Self { value, fields }
    }

    /// Create a record carrying only a name field.
    pub fn named(name_key: &str, name: &str, value: impl Into<MetaValue>) -> Self {
        let mut fields = Fields::with_capacity(1);
        fields.insert(name_key.to_string(), MetaValue::from(name));
        Self::new(value, fields)
    }

    pub fn value(&self) -> &MetaValue {
        &self.value
    }

    /// The shared handle to the value; mounted namespace slots hold clones of
    /// this same handle.
    pub fn shared_value(&self) -> &Arc<MetaValue> {
        &self.value
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&MetaValue> {
        self.fields.get(key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The record's name, read from the field `name_key`.
    ///
    /// Returns None if the field is missing or is not text.
    pub fn name(&self, name_key: &str) -> Option<&str> {
        self.field(name_key).and_then(MetaValue::as_str)
    }

    /// Whether the field `hidden_key` is present and truthy.
    pub fn is_hidden(&self, hidden_key: &str) -> bool {
        self.field(hidden_key).is_some_and(MetaValue::is_truthy)
    }
}
