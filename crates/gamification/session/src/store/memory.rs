//! In-memory SnapshotStore for tests and headless runs.

use std::collections::HashMap;
use std::sync::RwLock;

use gamification_core::ProgressSnapshot;

use crate::store::{Result, SnapshotStore, StoreError, storage_key};

/// In-memory implementation of [`SnapshotStore`].
///
/// Holds the serialized JSON per key rather than the decoded snapshot, so
/// every load/save round-trips through the real wire format.
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Write a raw value under a user's key, bypassing serialization.
    ///
    /// Lets tests and tooling plant corrupt or legacy payloads.
    pub fn put_raw(&self, user_id: &str, value: impl Into<String>) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(storage_key(user_id), value.into());
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, user_id: &str) -> Result<Option<ProgressSnapshot>> {
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        let Some(raw) = entries.get(&storage_key(user_id)) else {
            return Ok(None);
        };
        match serde_json::from_str(raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(error) => {
                tracing::warn!(user_id, %error, "stored snapshot is corrupt, treating as absent");
                Ok(None)
            }
        }
    }

    fn save(&self, user_id: &str, snapshot: &ProgressSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.insert(storage_key(user_id), json);
        Ok(())
    }

    fn exists(&self, user_id: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(&storage_key(user_id)))
            .unwrap_or(false)
    }

    fn delete(&self, user_id: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.remove(&storage_key(user_id));
        Ok(())
    }
}
