//! File-backed SnapshotStore.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use gamification_core::ProgressSnapshot;

use crate::store::{Result, SnapshotStore, StoreError, storage_key};

/// File-based implementation of [`SnapshotStore`].
///
/// Stores one `gamification_<userId>.json` document per user. Saves go
/// through a temp file plus atomic rename so a crash mid-write leaves the
/// previous snapshot intact.
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `base_dir`, creating the directory if
    /// needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(StoreError::Io)?;
        Ok(Self { base_dir })
    }

    /// Create a store under the platform data directory for the app.
    pub fn in_project_dirs() -> Result<Self> {
        let dirs = ProjectDirs::from("", "PingBadge", "pingbadge").ok_or(StoreError::NoDataDir)?;
        Self::new(dirs.data_dir().join("gamification"))
    }

    fn snapshot_path(&self, user_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", storage_key(user_id)))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, user_id: &str) -> Result<Option<ProgressSnapshot>> {
        let path = self.snapshot_path(user_id);

        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(StoreError::Io)?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => {
                tracing::debug!(user_id, "loaded snapshot from {}", path.display());
                Ok(Some(snapshot))
            }
            Err(error) => {
                tracing::warn!(user_id, %error, "stored snapshot is corrupt, treating as absent");
                Ok(None)
            }
        }
    }

    fn save(&self, user_id: &str, snapshot: &ProgressSnapshot) -> Result<()> {
        let path = self.snapshot_path(user_id);
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string(snapshot)?;

        // Write to temp file, then atomic rename
        fs::write(&temp_path, json).map_err(StoreError::Io)?;
        fs::rename(&temp_path, &path).map_err(StoreError::Io)?;

        tracing::debug!(user_id, "saved snapshot to {}", path.display());

        Ok(())
    }

    fn exists(&self, user_id: &str) -> bool {
        self.snapshot_path(user_id).exists()
    }

    fn delete(&self, user_id: &str) -> Result<()> {
        let path = self.snapshot_path(user_id);

        if path.exists() {
            fs::remove_file(&path).map_err(StoreError::Io)?;
            tracing::debug!(user_id, "deleted snapshot");
        }

        Ok(())
    }
}
