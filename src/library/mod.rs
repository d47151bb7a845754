//! Library store: the ordered track list, persisted as one JSON document.
//!
//! Tracks are deduplicated by file path. Every mutation rewrites the
//! whole document; a mutation whose write fails is undone in memory, so the
//! list always matches the last document written.

use std::path::{Path, PathBuf};

use crate::model::Track;
use crate::persist::{self, PersistError};

/// Ordered, path-unique list of tracks.
#[derive(Debug)]
pub struct Library {
    path: PathBuf,
    tracks: Vec<Track>,
}

impl Library {
    /// Load the library document at `path`.
    ///
    /// Missing or malformed documents yield an empty library. Duplicate
    /// paths in a hand-edited document keep their first occurrence.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let loaded: Vec<Track> = persist::load_document(&path);

        let mut library = Self {
            path,
            tracks: Vec::with_capacity(loaded.len()),
        };
        for track in loaded {
            library.push_unique(track);
        }
        tracing::info!(count = library.tracks.len(), "Library loaded from {:?}", library.path);
        library
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, file_path: &Path) -> Option<&Track> {
        self.tracks.iter().find(|t| t.file_path == file_path)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Add files picked by the user, titled after their file stems.
    ///
    /// Returns how many were new.
    pub fn add_files<I, P>(&mut self, paths: I) -> Result<usize, PersistError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.merge(paths.into_iter().map(Track::from_path))
    }

    /// Add scanned tracks whose paths are not in the library yet.
    ///
    /// Returns how many were new.
    pub fn merge_scanned(&mut self, tracks: Vec<Track>) -> Result<usize, PersistError> {
        self.merge(tracks)
    }

    /// Remove the track at `file_path`. Returns whether one was removed.
    pub fn remove(&mut self, file_path: &Path) -> Result<bool, PersistError> {
        let Some(index) = self.tracks.iter().position(|t| t.file_path == file_path) else {
            return Ok(false);
        };
        let removed = self.tracks.remove(index);
        if let Err(e) = self.save() {
            self.tracks.insert(index, removed);
            return Err(e);
        }
        Ok(true)
    }

    fn merge(&mut self, tracks: impl IntoIterator<Item = Track>) -> Result<usize, PersistError> {
        let before = self.tracks.len();
        for track in tracks {
            self.push_unique(track);
        }
        let added = self.tracks.len() - before;
        if added > 0 {
            if let Err(e) = self.save() {
                self.tracks.truncate(before);
                return Err(e);
            }
        }
        Ok(added)
    }

    fn push_unique(&mut self, track: Track) {
        if self.get(&track.file_path).is_none() {
            self.tracks.push(track);
        }
    }

    fn save(&self) -> Result<(), PersistError> {
        persist::write_document(&self.path, &self.tracks)
    }
}
