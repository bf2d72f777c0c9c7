//! Storage layer for Recipe Explorer
//!
//! This crate provides key-value persistence with pluggable backends and
//! change notifications shared between application instances.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod sync;

pub use kv::{KeyValueBackend, KvConfig, KvError, KvStore, MemoryBackend, SledBackend};
pub use sync::{ChangeBus, InstanceId, StorageEvent, StorageSubscription};
