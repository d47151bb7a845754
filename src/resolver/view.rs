//! Display-ready resolution results.

use std::path::PathBuf;

use crate::model::{CachedSongRecord, Track, title_from_path};
use crate::provider::ResolvedMetadata;

/// Where the artwork for a view comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArtworkSource {
    /// Bundled placeholder cover
    #[default]
    Default,
    /// User images, all present on disk; `remote_url` backs up missing ones
    CustomImages {
        images: Vec<PathBuf>,
        remote_url: Option<String>,
    },
    /// Artwork hosted by the provider
    RemoteUrl(String),
}

impl ArtworkSource {
    fn remote(url: Option<String>) -> Self {
        match url.filter(|u| !u.trim().is_empty()) {
            Some(url) => Self::RemoteUrl(url),
            None => Self::Default,
        }
    }
}

/// How a view was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOrigin {
    Cache,
    Provider,
    /// Locally derived; nothing was found or the lookup failed
    Local,
}

/// What the presentation layer shows for a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedView {
    pub song: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub file_path: PathBuf,
    pub artwork: ArtworkSource,
    pub origin: ViewOrigin,
}

/// Text labels ready for the now-playing panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLabels {
    pub song: String,
    pub artist: String,
    pub album: String,
    pub path: String,
}

impl ResolvedView {
    /// File name without extension, full path, default cover.
    pub fn fallback(track: &Track) -> Self {
        Self {
            song: title_from_path(&track.file_path),
            artist: None,
            album: None,
            file_path: track.file_path.clone(),
            artwork: ArtworkSource::Default,
            origin: ViewOrigin::Local,
        }
    }

    /// Built entirely from a cached record.
    pub fn from_record(record: CachedSongRecord) -> Self {
        let artwork = match record.usable_custom_images() {
            Some(images) => ArtworkSource::CustomImages {
                images: images.to_vec(),
                remote_url: record.cached_artwork_url.clone(),
            },
            None => ArtworkSource::remote(record.cached_artwork_url.clone()),
        };

        Self {
            song: record.song_name,
            artist: non_empty(record.artist_name),
            album: non_empty(record.album_name),
            file_path: record.file_path,
            artwork,
            origin: ViewOrigin::Cache,
        }
    }

    /// Built from a fresh provider match.
    pub fn from_metadata(track: &Track, metadata: ResolvedMetadata) -> Self {
        Self {
            song: metadata.song_name,
            artist: non_empty(metadata.artist_name),
            album: non_empty(metadata.album_name),
            file_path: track.file_path.clone(),
            artwork: ArtworkSource::remote(metadata.artwork_url),
            origin: ViewOrigin::Provider,
        }
    }

    pub fn labels(&self) -> DisplayLabels {
        let path = self.file_path.display().to_string();
        DisplayLabels {
            song: if self.song.trim().is_empty() {
                "No Song Selected".to_string()
            } else {
                self.song.clone()
            },
            artist: format!("Artist: {}", self.artist.as_deref().unwrap_or("-")),
            album: format!("Album: {}", self.album.as_deref().unwrap_or("-")),
            path: format!(
                "Path: {}",
                if path.is_empty() { "-" } else { path.as_str() }
            ),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}
