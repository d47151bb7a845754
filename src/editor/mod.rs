//! Edit flow for a song's cached record: rename it and manage its images.

use std::path::{Path, PathBuf};

use crate::cache::SongCache;
use crate::model::{CachedSongRecord, Track};
use crate::persist::PersistError;

/// Working copy of one song's cached record.
///
/// Nothing is written until [`SongEditor::save`].
#[derive(Debug, Clone)]
pub struct SongEditor {
    record: CachedSongRecord,
    selected: Option<PathBuf>,
}

impl SongEditor {
    /// Start from the cached record, or a local-only one if there is none.
    pub fn open(cache: &SongCache, track: &Track) -> Self {
        let record = cache
            .get(&track.file_path)
            .cloned()
            .unwrap_or_else(|| CachedSongRecord::local(&track.file_path));
        Self {
            record,
            selected: None,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.record.file_path
    }

    pub fn song_name(&self) -> &str {
        &self.record.song_name
    }

    pub fn set_song_name(&mut self, name: impl Into<String>) {
        self.record.song_name = name.into();
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.record.custom_images
    }

    /// Append images, skipping ones already in the list. Returns how many
    /// were added.
    pub fn add_images<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            let path = path.into();
            if !self.record.custom_images.contains(&path) {
                self.record.custom_images.push(path);
                added += 1;
            }
        }
        added
    }

    /// Select an image for removal. Unknown paths clear the selection.
    pub fn select_image(&mut self, path: &Path) {
        self.selected = self
            .record
            .custom_images
            .iter()
            .find(|p| p.as_path() == path)
            .cloned();
    }

    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// Remove the selected image, if any. Returns whether one was removed.
    pub fn remove_selected(&mut self) -> bool {
        let Some(selected) = self.selected.take() else {
            return false;
        };
        let before = self.record.custom_images.len();
        self.record.custom_images.retain(|p| *p != selected);
        self.record.custom_images.len() != before
    }

    /// Write the record through [`SongCache::save_or_update`].
    pub fn save(&self, cache: &mut SongCache) -> Result<(), PersistError> {
        tracing::info!(
            path = %self.record.file_path.display(),
            images = self.record.custom_images.len(),
            "Saving song edits"
        );
        cache.save_or_update(self.record.clone())
    }
}
