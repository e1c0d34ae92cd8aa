//! Device-local persistence for progress snapshots.
//!
//! One key-value record per user, namespaced by [`storage_key`], value
//! holding the full snapshot as JSON. Implementations fail safe on corrupt
//! data: an unreadable value loads as absent so the controller can
//! reinitialize instead of surfacing a parse error to the UI.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use gamification_core::ProgressSnapshot;

/// Errors surfaced by snapshot store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snapshot store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no usable data directory for snapshot storage")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence contract for per-user gamification snapshots.
///
/// Write failures are surfaced so the controller can log and carry on with
/// the in-memory state; corrupt reads are NOT surfaced and load as `None`.
pub trait SnapshotStore: Send + Sync {
    /// Load the snapshot for a user, or `None` when nothing usable is
    /// stored.
    fn load(&self, user_id: &str) -> Result<Option<ProgressSnapshot>>;

    /// Persist the full snapshot for a user, replacing any prior value.
    fn save(&self, user_id: &str, snapshot: &ProgressSnapshot) -> Result<()>;

    /// Check if a record exists for a user (readable or not).
    fn exists(&self, user_id: &str) -> bool;

    /// Delete a user's record. Account-lifecycle concern; the controller
    /// never calls this.
    fn delete(&self, user_id: &str) -> Result<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for std::sync::Arc<S> {
    fn load(&self, user_id: &str) -> Result<Option<ProgressSnapshot>> {
        (**self).load(user_id)
    }

    fn save(&self, user_id: &str, snapshot: &ProgressSnapshot) -> Result<()> {
        (**self).save(user_id, snapshot)
    }

    fn exists(&self, user_id: &str) -> bool {
        (**self).exists(user_id)
    }

    fn delete(&self, user_id: &str) -> Result<()> {
        (**self).delete(user_id)
    }
}

/// Namespaced storage key for a user's record.
pub fn storage_key(user_id: &str) -> String {
    format!("gamification_{user_id}")
}
