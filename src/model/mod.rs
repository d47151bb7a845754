//! Core data models shared by the library, the song cache and the resolver.
//!
//! The file path is the join key everywhere: a [`Track`] in the library, its
//! [`CachedSongRecord`] in the song cache and any in-flight resolution all
//! refer to the same absolute path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A library entry referencing one local audio file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Display title (file name without extension)
    pub title: String,
    /// Absolute file path (unique identifier)
    pub file_path: PathBuf,
}

impl Track {
    /// Build a track for `path`, titled after its file stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let file_path = path.into();
        Self {
            title: title_from_path(&file_path),
            file_path,
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// Enriched metadata persisted per file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSongRecord {
    /// Key; matches [`Track::file_path`]
    pub file_path: PathBuf,
    pub song_name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album_name: String,
    /// Remote artwork URL (already upscaled)
    #[serde(default)]
    pub cached_artwork_url: Option<String>,
    /// User-supplied images, absolute paths, in display order
    #[serde(default)]
    pub custom_images: Vec<PathBuf>,
}

impl CachedSongRecord {
    /// A record holding only what can be derived from the file itself.
    pub fn local(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        Self {
            song_name: title_from_path(&file_path),
            file_path,
            artist_name: String::new(),
            album_name: String::new(),
            cached_artwork_url: None,
            custom_images: Vec::new(),
        }
    }

    /// Custom images, only when every one of them still exists on disk.
    pub fn usable_custom_images(&self) -> Option<&[PathBuf]> {
        if self.custom_images.is_empty() || !self.custom_images.iter().all(|p| p.is_file()) {
            return None;
        }
        Some(&self.custom_images)
    }
}

/// File name without extension, or the whole path when there is no stem.
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
