use crate::prizes::Label;
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use fs_err as fs;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_STORAGE_KEY: &str = "askiSpinWheelPrizes";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct StorageKey(String);

crate::impl_string_newtype!(StorageKey);

impl Default for StorageKey {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to determine data directory")]
    DataDirNotFound,
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored prize list is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Somewhere the prize list survives between sessions.
pub trait PrizeStore {
    fn load(&self) -> Result<Option<Vec<Label>>, StoreError>;
    fn save(&self, labels: &[Label]) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// One JSON array of labels per storage key, kept in the platform data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_data_dir(key: &StorageKey) -> Result<Self, StoreError> {
        let proj_dirs = ProjectDirs::from("org", "prizewheel", "prizewheel")
            .ok_or(StoreError::DataDirNotFound)?;
        Ok(Self::new(proj_dirs.data_dir().join(format!("{key}.json"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrizeStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Label>>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, labels: &[Label]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(labels)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Keeps the serialized list in memory. Used by tests and when no data directory exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.lock().clone()
    }
}

impl PrizeStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Label>>, StoreError> {
        self.raw
            .lock()
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&self, labels: &[Label]) -> Result<(), StoreError> {
        *self.raw.lock() = Some(serde_json::to_string(labels)?);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.raw.lock() = None;
        Ok(())
    }
}

/// Loads the stored list, falling back to `defaults` when nothing usable is stored.
pub fn load_or_defaults(store: &dyn PrizeStore, defaults: &[Label]) -> Vec<Label> {
    match store.load() {
        Ok(Some(labels)) if !labels.is_empty() => labels,
        Ok(_) => defaults.to_vec(),
        Err(e) => {
            log::warn!("Could not load saved prizes, using defaults: {}", e);
            defaults.to_vec()
        }
    }
}

/// Saves without ever failing the caller. Returns whether the write went through.
pub fn save_best_effort(store: &dyn PrizeStore, labels: &[Label]) -> bool {
    match store.save(labels) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not save prizes: {}", e);
            false
        }
    }
}

pub fn clear_best_effort(store: &dyn PrizeStore) -> bool {
    match store.clear() {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not clear saved prizes: {}", e);
            false
        }
    }
}
