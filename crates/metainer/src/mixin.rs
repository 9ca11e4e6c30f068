//! # Attribute Metadata
//!
//! [`Attributes`] is the state a host carries to gain metadata-annotated
//! attributes; [`Metainer`] is the capability a host exposes once it embeds
//! that state.
//!
//! ## Write Path
//!
//! ```text
//! set("x", 42, { alias: "y" })
//!   │
//!   ├─► record { value: 42, fields: { name: "x", alias: "y" } }
//!   │     └─► appended to the host's RecordList (created on first use)
//!   │
//!   └─► MountPolicy (read from the namespace's `mounts` slot)
//!         └─► value written at each target slot via the raw namespace write
//! ```
//!
//! ## Read Path
//!
//! Reads never touch the record history. [`Attributes::get`] looks the name up
//! in the namespace and, on a miss, answers from the supplied defaults:
//!
//! | defaults | result |
//! |----------|--------|
//! | none | `Err(AttributeNotFound)` |
//! | one | that default |
//! | several | all defaults, as a `List` |
//!
//! ## Lazy History
//!
//! A host starts without a [`RecordList`]. The first `set` or `metainer()`
//! call creates it; afterwards `metainer()` always returns that same list.

use crate::config::{MetainerConfig, DEFAULT_CONFIG};
use crate::container::RecordList;
use crate::error::{MetainerError, Result};
use crate::mount::MountPolicy;
use crate::namespace::Namespace;
use crate::record::{Fields, MetadataRecord};
use crate::value::MetaValue;
use once_cell::unsync::OnceCell;
use std::sync::Arc;

/// Per-host metadata state: the plain namespace plus the record history.
#[derive(Debug)]
pub struct Attributes {
    config: Arc<MetainerConfig>,
    namespace: Namespace,
    metainer: OnceCell<RecordList>,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self::with_config(Arc::clone(&DEFAULT_CONFIG))
    }

    pub fn with_config(config: impl Into<Arc<MetainerConfig>>) -> Self {
        Self {
            config: config.into(),
            namespace: Namespace::new(),
            metainer: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &MetainerConfig {
        &self.config
    }

    /// Mounted values. Metadata is only reachable through [`Self::metainer`].
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The record history, created on first access.
    pub fn metainer(&self) -> &RecordList {
        self.metainer.get_or_init(|| {
            tracing::trace!(name_key = %self.config.name_key, "metainer initialized");
            RecordList::new(self.config.name_key.clone())
        })
    }

    /// Whether the record history has been created yet.
    pub fn has_metainer(&self) -> bool {
        self.metainer.get().is_some()
    }

    /// Record a write of `value` under `name` with metadata `fields`, then
    /// mount it according to the current mount policy.
    ///
    /// A field named like the name key is dropped: the record's name is
    /// always `name`.
    pub fn set(&mut self, name: &str, value: impl Into<MetaValue>, fields: Fields) {
        let value = Arc::new(value.into());
        let pairs = self.pairs(name, fields);

        let policy = MountPolicy::resolve(&self.namespace, &self.config);
        let targets = policy.targets(&pairs, &self.config);

        let position = self
            .metainer()
            .append(MetadataRecord::from_shared(Arc::clone(&value), pairs));
        tracing::debug!(name, position, slots = ?targets, "attribute recorded");

        for slot in targets {
            self.namespace.set_raw(&slot, Arc::clone(&value));
        }
    }

    /// Look `name` up in the namespace, falling back to `defaults`.
    pub fn get(&self, name: &str, defaults: &[MetaValue]) -> Result<Arc<MetaValue>> {
        if let Some(value) = self.namespace.get_raw(name) {
            return Ok(Arc::clone(value));
        }
        match defaults {
            [] => Err(MetainerError::AttributeNotFound(name.to_string())),
            [default] => Ok(Arc::new(default.clone())),
            many => Ok(Arc::new(MetaValue::List(many.to_vec()))),
        }
    }

    /// Borrowing lookup with no defaults.
    pub fn attr(&self, name: &str) -> Result<&MetaValue> {
        self.namespace
            .get_raw(name)
            .map(Arc::as_ref)
            .ok_or_else(|| MetainerError::AttributeNotFound(name.to_string()))
    }

    /// Remove a mounted slot. The record history is left untouched.
    pub fn delete(&mut self, name: &str) -> Result<Arc<MetaValue>> {
        self.namespace
            .remove_raw(name)
            .ok_or_else(|| MetainerError::AttributeNotFound(name.to_string()))
    }

    fn pairs(&self, name: &str, fields: Fields) -> Fields {
        let name_key = &self.config.name_key;
        let mut pairs = Fields::with_capacity(fields.len() + 1);
        pairs.insert(name_key.clone(), MetaValue::from(name));
        for (key, value) in fields {
            if key == *name_key {
                tracing::debug!(name, field = %key, "dropping field that shadows the name key");
                continue;
            }
            pairs.insert(key, value);
        }
        pairs
    }
}

/// Metadata-annotated attributes for a host type.
///
/// Implementors only provide access to their embedded [`Attributes`]; every
/// other method has a default that delegates to it.
///
/// ```
/// use metainer::{fields, Attributes, MetaValue, Metainer};
///
/// #[derive(Default)]
/// struct Sensor {
///     attrs: Attributes,
/// }
///
/// impl Metainer for Sensor {
///     fn attributes(&self) -> &Attributes {
///         &self.attrs
///     }
///
///     fn attributes_mut(&mut self) -> &mut Attributes {
///         &mut self.attrs
///     }
/// }
///
/// let mut sensor = Sensor::default();
/// sensor.set("temperature", 21.5, fields! { "unit" => "C" });
///
/// assert_eq!(sensor.attr("temperature").unwrap(), &MetaValue::Float(21.5));
/// let record = sensor.metainer().lookup("temperature").unwrap();
/// assert_eq!(record.field("unit"), Some(&MetaValue::from("C")));
/// ```
pub trait Metainer {
    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    /// The host's record history, created on first access.
    fn metainer(&self) -> &RecordList {
        self.attributes().metainer()
    }

    /// Record `value` under `name` with metadata `fields` and mount it.
    fn set(&mut self, name: &str, value: impl Into<MetaValue>, fields: Fields)
    where
        Self: Sized,
    {
        self.attributes_mut().set(name, value, fields);
    }

    /// Namespace lookup with positional defaults.
    fn get(&self, name: &str, defaults: &[MetaValue]) -> Result<Arc<MetaValue>> {
        self.attributes().get(name, defaults)
    }

    /// Plain assignment: a `set` with no metadata.
    fn assign(&mut self, name: &str, value: impl Into<MetaValue>)
    where
        Self: Sized,
    {
        self.attributes_mut().set(name, value, Fields::new());
    }

    /// Plain read: a `get` with no defaults.
    fn attr(&self, name: &str) -> Result<&MetaValue> {
        self.attributes().attr(name)
    }

    /// Remove a mounted attribute from the namespace.
    fn delete(&mut self, name: &str) -> Result<Arc<MetaValue>> {
        self.attributes_mut().delete(name)
    }
}

/// Bare `Attributes` is itself a host.
impl Metainer for Attributes {
    fn attributes(&self) -> &Attributes {
        self
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        self
    }
}
