//! Storage module
//!
//! Provides key-value persistence for remembered settings.

pub mod kv_store;

pub use kv_store::{FileStore, KeyValueStore, MemoryStore};
