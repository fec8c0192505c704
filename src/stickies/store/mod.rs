//! # Storage Layer
//!
//! This module owns the note collection and its durability. The [`Storage`]
//! trait abstracts the durable key-value mechanism so the core can run against
//! different backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `MemoryStorage` (no filesystem needed)
//! - Allow **future backends** without changing core logic
//! - Keep the store's contract **decoupled** from where bytes land
//!
//! ## Implementations
//!
//! - [`fs::FileStorage`]: production backend, one JSON file per key under the
//!   data directory (`notes.json` for the collection)
//! - [`memory::MemoryStorage`]: in-memory backend for tests, with a write
//!   counter and an optional quota to exercise the write-failure path
//!
//! ## Storage Format
//!
//! The whole collection is one durable value: a JSON array of note objects
//! under a single fixed key. Every committed mutation rewrites it wholesale,
//! so there are no partial-write states to reconcile. Write cost is
//! O(collection size) per edit, which is fine for personal note lists.

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod notes;

pub use notes::{NoteStore, NOTES_KEY};

/// Abstract interface to the durable key-value store.
pub trait Storage {
    /// Read the value at `key`. `None` if the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value at `key` wholesale.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}
