//! # Mount Policy
//!
//! Every write produces a record, but only some records are copied
//! ("mounted") into the host's plain namespace. The [`MountPolicy`] decides
//! where a record's value lands.
//!
//! ## Mount Keys
//!
//! The policy is a list of metadata field names. The list is read, per write,
//! from the host's own namespace under the configured `mounts_key`, so a host
//! reconfigures itself by writing that slot like any other attribute:
//!
//! - `List` of text: each text item is a mount key (other items are ignored)
//! - single `Text`: one mount key
//! - absent: the configured default mounts, or just the name key
//! - any other shape: treated as absent, with a warning
//!
//! ## Slots
//!
//! For each mount key present among a record's fields, the field's *value*
//! names the slot to write. With mount keys `["name", "alias"]`, a write of
//! `x` carrying `alias = "y"` lands in both `x` and `y`.
//!
//! ```text
//!   fields { name: "x", alias: "y", unit: "m" }
//!   mounts [ name, alias ]
//!            │     └──────────► slot "y"
//!            └────────────────► slot "x"   (skipped when hidden is truthy)
//! ```
//!
//! The hidden flag only suppresses the name-key mount; other keys still mount.

use crate::config::MetainerConfig;
use crate::namespace::Namespace;
use crate::record::Fields;
use crate::value::MetaValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPolicy {
    keys: Vec<String>,
}

impl MountPolicy {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// Read the policy from the namespace, falling back to the configured
    /// default mounts.
    pub fn resolve(namespace: &Namespace, config: &MetainerConfig) -> Self {
        let Some(value) = namespace.get_raw(&config.mounts_key) else {
            return Self::new(config.default_mounts());
        };

        match value.as_ref() {
            MetaValue::List(items) => Self::new(
                items
                    .iter()
                    .filter_map(MetaValue::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            MetaValue::Text(key) => Self::new(vec![key.clone()]),
            other => {
                tracing::warn!(
                    mounts_key = %config.mounts_key,
                    value = ?other,
                    "mount keys are neither a list nor text; using defaults"
                );
                Self::new(config.default_mounts())
            }
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Namespace slots a record with `fields` mounts to, in policy order.
    pub fn targets(&self, fields: &Fields, config: &MetainerConfig) -> Vec<String> {
        let hidden = fields
            .get(&config.hidden_key)
            .is_some_and(MetaValue::is_truthy);

        let mut slots = Vec::new();
        for key in &self.keys {
            let Some(slot) = fields.get(key) else {
                continue;
            };
            if hidden && *key == config.name_key {
                tracing::trace!(key = %key, "name mount hidden");
                continue;
            }
            match slot.as_str() {
                Some(slot) => slots.push(slot.to_string()),
                None => tracing::warn!(
                    key = %key,
                    value = ?slot,
                    "mount field does not name a slot; skipping"
                ),
            }
        }
        slots
    }
}
