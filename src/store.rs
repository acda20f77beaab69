//! Best-effort durable storage for window positions and small preferences.
//!
//! The core only ever talks to the [`PositionStore`] / [`PrefStore`] traits;
//! failures never cross this boundary. A read that fails is "absent", a
//! write that fails is dropped with a warning.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persisted per-window position. Size is intentionally not stored: windows
/// reopen at their declared default size, at the saved origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPosition {
    pub x: i32,
    pub y: i32,
}

/// Durable window-id → position map.
pub trait PositionStore {
    fn get(&self, key: &str) -> Option<SavedPosition>;
    fn set(&mut self, key: &str, position: SavedPosition);
}

/// Durable string preferences (wallpaper choice and the like).
pub trait PrefStore {
    fn get_pref(&self, key: &str) -> Option<String>;
    fn set_pref(&mut self, key: &str, value: &str);
}

/// Everything the desktop persists: window positions plus preferences.
pub trait DesktopStore: PositionStore + PrefStore {}

impl<T: PositionStore + PrefStore> DesktopStore for T {}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    positions: BTreeMap<String, SavedPosition>,
    prefs: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PositionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<SavedPosition> {
        self.positions.get(key).copied()
    }

    fn set(&mut self, key: &str, position: SavedPosition) {
        self.positions.insert(key.to_string(), position);
    }
}

impl PrefStore for MemoryStore {
    fn get_pref(&self, key: &str) -> Option<String> {
        self.prefs.get(key).cloned()
    }

    fn set_pref(&mut self, key: &str, value: &str) {
        self.prefs.insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Error)]
enum StoreError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    windows: BTreeMap<String, SavedPosition>,
    #[serde(default)]
    prefs: BTreeMap<String, String>,
}

/// JSON-file-backed store. The whole file is read once at open and
/// rewritten on every set; the data set is a handful of entries, so the
/// simplicity wins over incremental writes.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cache: StoreFile,
}

impl JsonFileStore {
    /// Opens (or seeds) the store at `path`. A missing, unreadable, or
    /// corrupt file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = match Self::load(&path) {
            Ok(cache) => cache,
            Err(err) => {
                tracing::warn!(error = %err, "position store unreadable, starting empty");
                StoreFile::default()
            }
        };
        Self { path, cache }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<StoreFile, StoreError> {
        if !path.exists() {
            return Ok(StoreFile::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    fn flush(&self) {
        if let Err(err) = self.try_flush() {
            tracing::warn!(error = %err, "position store write dropped");
        }
    }

    fn try_flush(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&self.cache)?;
        fs::write(&self.path, raw).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl PositionStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<SavedPosition> {
        self.cache.windows.get(key).copied()
    }

    fn set(&mut self, key: &str, position: SavedPosition) {
        self.cache.windows.insert(key.to_string(), position);
        self.flush();
    }
}

impl PrefStore for JsonFileStore {
    fn get_pref(&self, key: &str) -> Option<String> {
        self.cache.prefs.get(key).cloned()
    }

    fn set_pref(&mut self, key: &str, value: &str) {
        self.cache.prefs.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get("about").is_none());
        store.set("about", SavedPosition { x: 10, y: 20 });
        assert_eq!(store.get("about"), Some(SavedPosition { x: 10, y: 20 }));
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("positions.json");
        {
            let mut store = JsonFileStore::open(&path);
            store.set("projects", SavedPosition { x: -8, y: 3 });
            store.set_pref("wallpaper", "aubergine");
        }
        let store = JsonFileStore::open(&path);
        assert_eq!(store.get("projects"), Some(SavedPosition { x: -8, y: 3 }));
        assert_eq!(store.get_pref("wallpaper").as_deref(), Some("aubergine"));
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("positions.json");
        fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::open(&path);
        assert!(store.get("about").is_none());
    }
}
