//! Whole-file JSON persistence for resources and playlists.
//!
//! Each collection is its own file. Loads read the entire document; saves
//! serialize the entire document to a sibling `.tmp` file and rename it over
//! the target. There is no locking: two processes mutating the same data
//! directory concurrently can lose updates.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use shelf_catalog::{PlaylistFile, ResourceFile};
use thiserror::Error;

pub const RESOURCES_FILE: &str = "resources.json";
pub const PLAYLISTS_FILE: &str = "playlists.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
}

/// Locations of the two catalog documents.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    resources_path: PathBuf,
    playlists_path: PathBuf,
}

impl CatalogStore {
    /// A store keeping both documents in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            resources_path: dir.join(RESOURCES_FILE),
            playlists_path: dir.join(PLAYLISTS_FILE),
        }
    }

    /// A store with explicit document paths.
    pub fn new(resources_path: PathBuf, playlists_path: PathBuf) -> Self {
        Self {
            resources_path,
            playlists_path,
        }
    }

    pub fn resources_path(&self) -> &Path {
        &self.resources_path
    }

    pub fn playlists_path(&self) -> &Path {
        &self.playlists_path
    }

    /// Load the resource list. A missing file is an empty catalog.
    pub fn load_resources(&self) -> Result<ResourceFile, StoreError> {
        load_json(&self.resources_path)
    }

    pub fn save_resources(&self, file: &ResourceFile) -> Result<(), StoreError> {
        write_json_atomic(&self.resources_path, file)
    }

    /// Load the playlist list. A missing file means no playlists.
    pub fn load_playlists(&self) -> Result<PlaylistFile, StoreError> {
        load_json(&self.playlists_path)
    }

    pub fn save_playlists(&self, file: &PlaylistFile) -> Result<(), StoreError> {
        write_json_atomic(&self.playlists_path, file)
    }
}

/// Read and parse a JSON document, returning `T::default()` if it doesn't exist.
pub fn load_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("{} not found, starting empty", path.display());
            return Ok(T::default());
        }
        Err(e) => {
            return Err(StoreError::Io {
                path: path.display().to_string(),
                source: e,
            });
        }
    };
    if contents.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Pretty-print `value` to `path` via a temp file and rename.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.display().to_string(),
        source,
    };

    let serialized = serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialize {
        path: path.display().to_string(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serialized).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
