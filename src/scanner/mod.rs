use futures::StreamExt;
use futures::stream::Stream;
use std::path::PathBuf;
use tokio::sync::mpsc;
use walkdir::WalkDir;

use crate::model::Track;

/// Audio extensions picked up by a folder scan (compared lowercase).
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "m4a"];

/// Whether `path` looks like a playable audio file.
pub fn is_audio_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Scans the given root directory recursively for audio files.
///
/// Returns a Stream of PathBufs.
pub fn scan(root: PathBuf) -> impl Stream<Item = PathBuf> {
    let (tx, rx) = mpsc::channel(100);

    // The walk is synchronous, keep it off the async threads
    tokio::task::spawn_blocking(move || {
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && is_audio_file(entry.path()) {
                // Receiver dropped: stop scanning
                if tx.blocking_send(entry.path().to_path_buf()).is_err() {
                    break;
                }
            }
        }
    });

    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|path| (path, rx))
    })
}

/// Scan `root` and collect library tracks, sorted by path.
pub async fn scan_tracks(root: PathBuf) -> Vec<Track> {
    let mut paths: Vec<PathBuf> = scan(root).collect().await;
    paths.sort();
    paths.into_iter().map(Track::from_path).collect()
}
