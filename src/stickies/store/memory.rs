use super::Storage;
use crate::error::{NotesError, Result};
use std::collections::HashMap;

/// In-memory storage for tests. Counts successful writes (the coalescing
/// contract is "one write per burst") and can enforce a byte quota to mimic
/// a full browser-style key-value store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    map: HashMap<String, String>,
    quota_bytes: Option<usize>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes whose value exceeds `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota_bytes: Some(bytes),
            ..Self::default()
        }
    }

    pub fn set_quota(&mut self, bytes: Option<usize>) {
        self.quota_bytes = bytes;
    }

    /// Number of successful writes across all keys.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Raw stored value, for tests inspecting the persisted JSON.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Seed a key directly, bypassing the write counter.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(NotesError::Store(format!(
                    "quota exceeded writing key '{}' ({} > {} bytes)",
                    key,
                    value.len(),
                    quota
                )));
            }
        }
        self.map.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
