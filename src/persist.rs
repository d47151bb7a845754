//! Whole-document JSON persistence shared by the library and the song cache.
//!
//! Both stores follow the same rules:
//! - A missing document is an empty store, not an error.
//! - A malformed document is discarded with a warning and the store starts
//!   empty.
//! - Every mutation rewrites the entire document (temp file + rename).
//!
//! Rewriting everything is fine for a personal library of a few thousand
//! entries; nothing here is incremental.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors writing a persisted document.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Failed to create directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize document: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

/// Load a JSON document, recovering to `T::default()` when it is missing or
/// cannot be parsed.
pub fn load_document<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        tracing::info!("No document at {:?}, starting empty", path);
        return T::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(doc) => {
                tracing::debug!("Loaded {:?}", path);
                doc
            }
            Err(e) => {
                tracing::warn!("Discarding malformed document {:?}: {}", path, e);
                T::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {:?}: {}", path, e);
            T::default()
        }
    }
}

/// Serialize `doc` as pretty JSON and atomically replace `path` with it.
pub fn write_document<T>(path: &Path, doc: &T) -> Result<(), PersistError>
where
    T: Serialize + ?Sized,
{
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| PersistError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = serde_json::to_string_pretty(doc).map_err(PersistError::Serialize)?;

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, &contents)
        .map_err(|e| PersistError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| PersistError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::debug!("Wrote {:?}", path);
    Ok(())
}
