//! Metadata value type.
//!
//! Records, metadata fields and the host namespace all hold [`MetaValue`]s.
//! The store places no schema on them: a field may hold any variant, and the
//! only interpretation the store itself performs is truthiness (for the
//! hidden flag) and text extraction (for mount slot names and mount keys).

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;
use uuid::Uuid;

/// Runtime representation of an attribute value or a metadata field value.
#[derive(Debug, Clone, Default)]
pub enum MetaValue {
    /// Absence of a value.
    #[default]
    Null,

    Bool(bool),

    Int(i64),

    Float(f64),

    Text(String),

    List(Vec<MetaValue>),

    /// Nested key/value data (e.g. a units block), insertion ordered.
    Map(IndexMap<String, MetaValue>),

    /// Point in time (e.g. when a value was observed).
    Timestamp(DateTime<Utc>),

    /// Reference to another entity (e.g. provenance source).
    Ref(Uuid),

    /// Payload the store never inspects.
    ///
    /// Cloning shares the allocation; two opaque values are equal only when
    /// they point to the same object.
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl MetaValue {
    /// Wrap an arbitrary payload as an opaque value.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        MetaValue::Opaque(Arc::new(value))
    }

    /// Truthiness as used by the hidden flag.
    ///
    /// - Null: false
    /// - Bool: the boolean itself
    /// - Int / Float: non-zero
    /// - Text / List / Map: non-empty
    /// - Timestamp / Ref / Opaque: always true
    pub fn is_truthy(&self) -> bool {
        match self {
            MetaValue::Null => false,
            MetaValue::Bool(v) => *v,
            MetaValue::Int(v) => *v != 0,
            MetaValue::Float(v) => *v != 0.0,
            MetaValue::Text(v) => !v.is_empty(),
            MetaValue::List(v) => !v.is_empty(),
            MetaValue::Map(v) => !v.is_empty(),
            MetaValue::Timestamp(_) | MetaValue::Ref(_) | MetaValue::Opaque(_) => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, MetaValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            MetaValue::Float(v) => Some(*v),
            MetaValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get the string if this is Text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, MetaValue>> {
        match self {
            MetaValue::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            MetaValue::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_ref_id(&self) -> Option<Uuid> {
        match self {
            MetaValue::Ref(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrow an opaque payload as its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            MetaValue::Opaque(v) => v.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for MetaValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MetaValue::Null, MetaValue::Null) => true,
            (MetaValue::Bool(a), MetaValue::Bool(b)) => a == b,
            (MetaValue::Int(a), MetaValue::Int(b)) => a == b,
            (MetaValue::Float(a), MetaValue::Float(b)) => a == b,
            (MetaValue::Text(a), MetaValue::Text(b)) => a == b,
            (MetaValue::List(a), MetaValue::List(b)) => a == b,
            (MetaValue::Map(a), MetaValue::Map(b)) => a == b,
            (MetaValue::Timestamp(a), MetaValue::Timestamp(b)) => a == b,
            (MetaValue::Ref(a), MetaValue::Ref(b)) => a == b,
            (MetaValue::Opaque(a), MetaValue::Opaque(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<i32> for MetaValue {
    fn from(value: i32) -> Self {
        MetaValue::Int(value.into())
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Int(value)
    }
}

impl From<u32> for MetaValue {
    fn from(value: u32) -> Self {
        MetaValue::Int(value.into())
    }
}

impl From<f32> for MetaValue {
    fn from(value: f32) -> Self {
        MetaValue::Float(value.into())
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<DateTime<Utc>> for MetaValue {
    fn from(value: DateTime<Utc>) -> Self {
        MetaValue::Timestamp(value)
    }
}

impl From<Uuid> for MetaValue {
    fn from(value: Uuid) -> Self {
        MetaValue::Ref(value)
    }
}

impl<T: Into<MetaValue>> From<Vec<T>> for MetaValue {
    fn from(value: Vec<T>) -> Self {
        MetaValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<MetaValue>> From<Option<T>> for MetaValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(MetaValue::Null, Into::into)
    }
}

impl From<IndexMap<String, MetaValue>> for MetaValue {
    fn from(value: IndexMap<String, MetaValue>) -> Self {
        MetaValue::Map(value)
    }
}

/// JSON-shaped metadata converts structurally. Numbers that fit an `i64`
/// become `Int`; every other number becomes `Float`.
impl From<serde_json::Value> for MetaValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => MetaValue::Null,
            Value::Bool(b) => MetaValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => MetaValue::Int(i),
                None => n.as_f64().map_or(MetaValue::Null, MetaValue::Float),
            },
            Value::String(s) => MetaValue::Text(s),
            Value::Array(items) => MetaValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                MetaValue::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
