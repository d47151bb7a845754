//! Song cache: file path → enriched record.
//!
//! Loaded fully into memory once; the in-memory map is the source of truth
//! between flushes. Every [`SongCache::save_or_update`] rewrites the whole
//! JSON document.
//!
//! Async callers split the upsert from the write: [`SongCache::insert`]
//! under the lock, then [`CacheSnapshot::write`] off the lock on a blocking
//! thread.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::model::CachedSongRecord;
use crate::persist::{self, PersistError};

/// Durable per-song metadata and image cache.
#[derive(Debug)]
pub struct SongCache {
    path: PathBuf,
    records: BTreeMap<PathBuf, CachedSongRecord>,
    /// Bumped on every insert
    version: u64,
    /// Version most recently written to disk
    written: Arc<Mutex<u64>>,
}

/// Point-in-time copy of the cache, writable without holding the cache lock.
#[derive(Debug)]
pub struct CacheSnapshot {
    path: PathBuf,
    records: BTreeMap<PathBuf, CachedSongRecord>,
    version: u64,
    written: Arc<Mutex<u64>>,
}

impl CacheSnapshot {
    /// Replace the document with this snapshot.
    ///
    /// Writes are serialized; a snapshot older than the last one written is
    /// skipped so the document never goes backwards.
    pub fn write(self) -> Result<(), PersistError> {
        let mut written = self.written.lock();
        if *written >= self.version {
            tracing::debug!(version = self.version, "Skipping stale cache snapshot");
            return Ok(());
        }
        persist::write_document(&self.path, &self.records)?;
        *written = self.version;
        Ok(())
    }
}

impl SongCache {
    /// Load the cache document at `path`.
    ///
    /// Missing or malformed documents yield an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let records: BTreeMap<PathBuf, CachedSongRecord> = persist::load_document(&path);
        tracing::info!(count = records.len(), "Song cache loaded from {:?}", path);
        Self {
            path,
            records,
            version: 0,
            written: Arc::new(Mutex::new(0)),
        }
    }

    /// Pure in-memory lookup.
    pub fn get(&self, file_path: &Path) -> Option<&CachedSongRecord> {
        self.records.get(file_path)
    }

    /// Upsert by file path, then persist the entire map.
    ///
    /// The in-memory map is updated even when the write fails.
    pub fn save_or_update(&mut self, record: CachedSongRecord) -> Result<(), PersistError> {
        self.insert(record);
        self.snapshot().write()
    }

    /// Upsert in memory only. Follow with [`snapshot`](Self::snapshot) and
    /// [`CacheSnapshot::write`].
    pub fn insert(&mut self, record: CachedSongRecord) {
        tracing::debug!(path = %record.file_path.display(), "Caching song record");
        self.records.insert(record.file_path.clone(), record);
        self.version += 1;
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            path: self.path.clone(),
            records: self.records.clone(),
            version: self.version,
            written: self.written.clone(),
        }
    }

    /// Handle to the writer lock, so tests can hold a write open.
    #[cfg(test)]
    pub(crate) fn writer(&self) -> Arc<Mutex<u64>> {
        self.written.clone()
    }

    pub fn contains(&self, file_path: &Path) -> bool {
        self.records.contains_key(file_path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_record;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_cache() {
        let temp = TempDir::new().unwrap();
        let cache = SongCache::load(temp.path().join("song_cache.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty_cache() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("song_cache.json");
        std::fs::write(&path, "[1, 2, oops").unwrap();

        let mut cache = SongCache::load(&path);
        assert!(cache.is_empty());

        // Recovery overwrites the broken document on the next save
        cache.save_or_update(mock_record("/music/a.mp3")).unwrap();
        let reloaded = SongCache::load(&path);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_save_and_get_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("song_cache.json");

        let record = CachedSongRecord {
            custom_images: vec![PathBuf::from("/pics/1.png"), PathBuf::from("/pics/2.png")],
            ..mock_record("/music/a.mp3")
        };

        let mut cache = SongCache::load(&path);
        cache.save_or_update(record.clone()).unwrap();
        assert_eq!(cache.get(Path::new("/music/a.mp3")), Some(&record));

        let reloaded = SongCache::load(&path);
        assert_eq!(reloaded.get(Path::new("/music/a.mp3")), Some(&record));
    }

    #[test]
    fn test_update_replaces_existing_record() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("song_cache.json");
        let mut cache = SongCache::load(&path);

        cache.save_or_update(mock_record("/music/a.mp3")).unwrap();
        cache
            .save_or_update(CachedSongRecord {
                song_name: "Renamed".to_string(),
                ..mock_record("/music/a.mp3")
            })
            .unwrap();

        assert_eq!(cache.len(), 1);
        let reloaded = SongCache::load(&path);
        assert_eq!(
            reloaded.get(Path::new("/music/a.mp3")).unwrap().song_name,
            "Renamed"
        );
    }

    #[test]
    fn test_snapshot_writes_without_cache_borrow() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("song_cache.json");
        let mut cache = SongCache::load(&path);

        cache.insert(mock_record("/music/a.mp3"));
        assert!(!path.exists());

        let snapshot = cache.snapshot();
        // The cache stays usable while the snapshot is written
        cache.insert(mock_record("/music/b.mp3"));
        snapshot.write().unwrap();

        let reloaded = SongCache::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.contains(Path::new("/music/a.mp3")));
    }

    #[test]
    fn test_older_snapshot_never_overwrites_newer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("song_cache.json");
        let mut cache = SongCache::load(&path);

        cache.insert(mock_record("/music/a.mp3"));
        let older = cache.snapshot();
        cache.insert(mock_record("/music/b.mp3"));
        let newer = cache.snapshot();

        newer.write().unwrap();
        older.write().unwrap();

        assert_eq!(SongCache::load(&path).len(), 2);
    }

    #[test]
    fn test_document_is_keyed_by_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("song_cache.json");
        let mut cache = SongCache::load(&path);
        cache.save_or_update(mock_record("/music/a.mp3")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["/music/a.mp3"]["songName"], "Test Song");
    }
}
