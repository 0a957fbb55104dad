//! Favorite areas persisted in durable key-value storage.
//!
//! The whole set is stored as one JSON array under [`FAVORITES_KEY`] and is
//! rewritten synchronously on every toggle.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::Area;

/// Storage key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "powerup-favorites";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key-value storage with synchronous reads and writes.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

// =========================================================
// Backends
// =========================================================

/// In-memory store. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A JSON object on disk mapping keys to string values.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> StorageResult<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        let serialized = serde_json::to_string_pretty(&entries)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), key, "Storage entry written");
        Ok(())
    }
}

// =========================================================
// Favorites
// =========================================================

/// The user's favorite areas, unique by id.
pub struct FavoritesStore<S> {
    store: S,
    favorites: Vec<Area>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load saved favorites. Missing or unreadable data starts an empty set.
    pub fn open(store: S) -> Self {
        let favorites = match store.get(FAVORITES_KEY) {
            Ok(Some(saved)) => serde_json::from_str::<Vec<Area>>(&saved).unwrap_or_else(|e| {
                warn!(error = %e, "Saved favorites are corrupt, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read saved favorites, starting empty");
                Vec::new()
            }
        };
        let mut favorites_store = Self { store, favorites };
        favorites_store.dedup();
        favorites_store
    }

    pub fn favorites(&self) -> &[Area] {
        &self.favorites
    }

    pub fn is_favorite(&self, area_id: &str) -> bool {
        self.favorites.iter().any(|fav| fav.id == area_id)
    }

    /// Remove `area` if present, otherwise add it, then persist.
    ///
    /// The in-memory set is only updated once the write succeeds.
    pub fn toggle(&mut self, area: &Area) -> StorageResult<&[Area]> {
        let updated: Vec<Area> = if self.is_favorite(&area.id) {
            self.favorites
                .iter()
                .filter(|fav| fav.id != area.id)
                .cloned()
                .collect()
        } else {
            self.favorites.iter().cloned().chain([area.clone()]).collect()
        };

        let serialized = serde_json::to_string(&updated)?;
        self.store.set(FAVORITES_KEY, &serialized)?;
        self.favorites = updated;
        Ok(&self.favorites)
    }

    fn dedup(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.favorites.retain(|fav| seen.insert(fav.id.clone()));
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
