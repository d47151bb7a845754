//! Metadata resolution - decides what to display for the playing track.
//!
//! Priority:
//! 1. Song cache (no network at all)
//! 2. One provider lookup by normalized title, written back to the cache
//! 3. Locally derived fallback (file name, default artwork), never cached
//!
//! # Supersession
//!
//! The resolver owns a single "current lookup" token. Every call to
//! [`MetadataResolver::begin_lookup`] (and so every
//! [`MetadataResolver::resolve`]) cancels the previous token before doing
//! anything else, so at most one lookup is in flight. A superseded call
//! resolves to `None` and shows nothing, however its lookup finishes.

mod view;

pub use view::{ArtworkSource, DisplayLabels, ResolvedView, ViewOrigin};

use std::sync::Arc;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::cache::SongCache;
use crate::model::{CachedSongRecord, Track};
use crate::provider::{MetadataProvider, ProviderError, ResolvedMetadata};

/// Cache-first metadata resolver with cancel-then-replace lookups.
pub struct MetadataResolver<P> {
    provider: P,
    cache: Arc<Mutex<SongCache>>,
    current: Mutex<CurrentLookup>,
}

/// A claim on the lookup slot, handed out by [`MetadataResolver::begin_lookup`].
#[derive(Debug)]
pub struct Lookup {
    generation: u64,
    token: CancellationToken,
}

/// The single lookup slot. A fresh token per call; the old one is cancelled.
#[derive(Default)]
struct CurrentLookup {
    generation: u64,
    token: CancellationToken,
    pending: bool,
}

impl<P: MetadataProvider> MetadataResolver<P> {
    pub fn new(provider: P, cache: Arc<Mutex<SongCache>>) -> Self {
        Self {
            provider,
            cache,
            current: Mutex::new(CurrentLookup::default()),
        }
    }

    /// Shared handle to the song cache (for the edit flow).
    pub fn cache(&self) -> &Arc<Mutex<SongCache>> {
        &self.cache
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Selection preview: file name and path only, no lookup.
    ///
    /// Does not touch the in-flight lookup.
    pub fn preview(&self, track: &Track) -> ResolvedView {
        ResolvedView::fallback(track)
    }

    /// Resolve display metadata for `track`.
    ///
    /// Returns `None` when a newer call superseded this one; the caller must
    /// not update the display in that case.
    pub async fn resolve(&self, track: &Track) -> Option<ResolvedView> {
        let lookup = self.begin_lookup();
        self.resolve_with(track, lookup).await
    }

    /// Claim the lookup slot now, cancelling whatever held it.
    ///
    /// The order of `begin_lookup` calls decides which lookup is current,
    /// regardless of when the matching [`resolve_with`](Self::resolve_with)
    /// futures are first polled.
    pub fn begin_lookup(&self) -> Lookup {
        let mut current = self.current.lock();
        current.token.cancel();
        current.generation += 1;
        current.token = CancellationToken::new();
        current.pending = true;
        Lookup {
            generation: current.generation,
            token: current.token.clone(),
        }
    }

    /// Run a lookup claimed with [`begin_lookup`](Self::begin_lookup).
    pub async fn resolve_with(&self, track: &Track, lookup: Lookup) -> Option<ResolvedView> {
        let Lookup { generation, token } = lookup;
        if token.is_cancelled() {
            tracing::debug!(path = %track.file_path.display(), "Superseded before start");
            return None;
        }

        let cached = self.cache.lock().get(&track.file_path).cloned();
        if let Some(record) = cached {
            tracing::debug!(path = %track.file_path.display(), "Song cache hit");
            self.finish(generation);
            return Some(ResolvedView::from_record(record));
        }

        let query = normalize_query(&track.title);
        if query.is_empty() {
            tracing::debug!(path = %track.file_path.display(), "Blank query, skipping lookup");
            self.finish(generation);
            return Some(ResolvedView::fallback(track));
        }

        tracing::info!(%query, path = %track.file_path.display(), "Looking up track");
        let outcome = self.provider.search(&query, &token).await;

        if token.is_cancelled() {
            tracing::debug!(%query, "Lookup superseded, discarding result");
            return None;
        }
        self.finish(generation);

        match outcome {
            Ok(Some(metadata)) => {
                let record = record_from_metadata(track, &metadata);
                self.persist(record).await;
                if token.is_cancelled() {
                    tracing::debug!(%query, "Superseded while caching, discarding view");
                    return None;
                }
                Some(ResolvedView::from_metadata(track, metadata))
            }
            Ok(None) => {
                tracing::info!(%query, "No match");
                Some(ResolvedView::fallback(track))
            }
            Err(ProviderError::Cancelled) => None,
            Err(e) => {
                tracing::warn!(%query, error = %e, "Lookup failed, using local metadata");
                Some(ResolvedView::fallback(track))
            }
        }
    }

    /// Download remote artwork for display.
    ///
    /// Bound to the current lookup: a newer [`resolve`](Self::resolve)
    /// cancels the download. Any failure means "show the default cover".
    pub async fn fetch_artwork(&self, url: &str) -> Option<Vec<u8>> {
        let token = self.current.lock().token.clone();

        match self.provider.fetch_artwork(url, &token).await {
            Ok(data) if !token.is_cancelled() => Some(data),
            Ok(_) | Err(ProviderError::Cancelled) => None,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Artwork download failed");
                None
            }
        }
    }

    /// Cancel whatever lookup is in flight, if any.
    pub fn cancel_current(&self) {
        let mut current = self.current.lock();
        current.token.cancel();
        current.pending = false;
    }

    /// Whether a lookup is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.current.lock().pending
    }

    /// Mark the lookup done; its token stays current for artwork downloads.
    fn finish(&self, generation: u64) {
        let mut current = self.current.lock();
        if current.generation == generation {
            current.pending = false;
        }
    }

    /// Upsert under the lock, write the snapshot off it.
    async fn persist(&self, record: CachedSongRecord) {
        let path = record.file_path.clone();
        let snapshot = {
            let mut cache = self.cache.lock();
            cache.insert(record);
            cache.snapshot()
        };
        let result = tokio::task::spawn_blocking(move || snapshot.write()).await;

        match result {
            Ok(Ok(())) => tracing::debug!(path = %path.display(), "Cached lookup result"),
            Ok(Err(e)) => tracing::warn!(path = %path.display(), error = %e, "Failed to write song cache"),
            Err(e) => tracing::warn!(error = %e, "Song cache writer task failed"),
        }
    }
}

/// Build a search query from a display title.
///
/// `-` and `_` become spaces, whitespace runs collapse, ends are trimmed.
pub fn normalize_query(title: &str) -> String {
    title
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn record_from_metadata(track: &Track, metadata: &ResolvedMetadata) -> CachedSongRecord {
    CachedSongRecord {
        file_path: track.file_path.clone(),
        song_name: metadata.song_name.clone(),
        artist_name: metadata.artist_name.clone(),
        album_name: metadata.album_name.clone(),
        cached_artwork_url: metadata.artwork_url.clone(),
        custom_images: Vec::new(),
    }
}
