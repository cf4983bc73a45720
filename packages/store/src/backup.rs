//! # Local Backup Storage
//!
//! Durable mirror of the live store state, used for crash/reload recovery.
//! Distinct from server-side save: the backup is written on every content
//! mutation and cleared on a successful save.
//!
//! Backends:
//! - **File-backed**: one JSON file in a fixed slot (production)
//! - **Memory-backed**: for tests, including malformed-snapshot injection

use crate::errors::StoreError;
use crate::state::SiteState;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed slot name for the file-backed snapshot
pub const BACKUP_FILE_NAME: &str = "website-store.json";

/// Storage backend for the backup snapshot
pub trait BackupStorage {
    /// True iff a persisted snapshot exists
    fn exists(&self) -> bool;

    /// Read and deserialize the snapshot
    fn read(&self) -> Result<SiteState, StoreError>;

    /// Serialize and persist the snapshot
    fn write(&mut self, state: &SiteState) -> Result<(), StoreError>;

    /// Delete the snapshot
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// File-backed snapshot (single-user editing)
#[derive(Debug)]
pub struct FileBackup {
    path: PathBuf,
}

impl FileBackup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Standard slot inside a directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(BACKUP_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackupStorage for FileBackup {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> Result<SiteState, StoreError> {
        if !self.exists() {
            return Err(StoreError::NoBackup);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write(&mut self, state: &SiteState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(state)?;
        // Stage to a sibling file and rename, so an interrupted write can
        // never leave a truncated snapshot in the slot
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, raw)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        if self.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory snapshot slot (tests, temp sessions)
#[derive(Debug, Default)]
pub struct MemoryBackup {
    slot: Option<String>,
}

impl MemoryBackup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the slot with raw bytes, valid or not. Used to exercise the
    /// corrupted-snapshot recovery path.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Some(raw.into()),
        }
    }
}

impl BackupStorage for MemoryBackup {
    fn exists(&self) -> bool {
        self.slot.is_some()
    }

    fn read(&self) -> Result<SiteState, StoreError> {
        let raw = self.slot.as_ref().ok_or(StoreError::NoBackup)?;
        Ok(serde_json::from_str(raw)?)
    }

    fn write(&mut self, state: &SiteState) -> Result<(), StoreError> {
        self.slot = Some(serde_json::to_string(state)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.slot = None;
        Ok(())
    }
}
