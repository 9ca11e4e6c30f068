//! # Metainer Architecture
//!
//! Metainer gives a host type **attributes that carry metadata**. Every write
//! leaves a record of the value and its metadata fields (provenance, units,
//! display name, visibility...), while ordinary reads stay plain lookups in a
//! name -> value namespace.
//!
//! ## The Two Views of an Attribute
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Namespace (namespace.rs)                                   │
//! │  - What plain reads see: slot name -> value                 │
//! │  - Filled only by mounting                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ mount (mount.rs)
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Record history (container.rs)                              │
//! │  - One MetadataRecord per write, in write order             │
//! │  - Reachable by position or by name                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A write always produces a record. Whether, and where, the value is also
//! mounted into the namespace is decided by the [`MountPolicy`], which the
//! host configures through its own `mounts` slot. A truthy `hidden` field
//! keeps a value out of its name slot while still recording it.
//!
//! ## Adopting the Capability
//!
//! A host embeds an [`Attributes`] and implements [`Metainer`] by handing it
//! out. Everything else (`set`, `get`, `metainer`, `assign`, `attr`,
//! `delete`) comes from default methods.
//!
//! ## Threading
//!
//! One host, one thread. The record history uses interior mutability and is
//! not `Sync`; share a host across threads only behind a lock.
//!
//! ## Module Overview
//!
//! - [`mixin`]: [`Metainer`] trait and per-host [`Attributes`] state
//! - [`container`]: [`RecordList`], the ordered, name-indexed history
//! - [`record`]: [`MetadataRecord`], [`Fields`] and the [`fields!`] macro
//! - [`mount`]: [`MountPolicy`], where values land
//! - [`namespace`]: [`Namespace`], the plain attribute map
//! - [`value`]: [`MetaValue`], the schema-free value type
//! - [`config`]: [`MetainerConfig`], reserved key names and default mounts
//! - [`error`]: Error types

pub mod config;
pub mod container;
pub mod error;
pub mod mixin;
pub mod mount;
pub mod namespace;
pub mod record;
pub mod value;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use config::{MetainerConfig, DEFAULT_HIDDEN_KEY, DEFAULT_MOUNTS_KEY};
pub use container::{RecordList, Records, DEFAULT_NAME_KEY};
pub use error::{MetainerError, Result};
pub use mixin::{Attributes, Metainer};
pub use mount::MountPolicy;
pub use namespace::Namespace;
pub use record::{Fields, MetadataRecord};
pub use value::MetaValue;
