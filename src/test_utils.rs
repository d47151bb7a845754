//! Test utilities and fixtures for tunedeck tests.
//!
//! Common factories for tracks and cache records, on-disk fixtures, and a
//! tiny one-shot HTTP server for provider contract tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{temp_cache, mock_track};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (cache, _dir) = temp_cache();
//!     let track = mock_track("/music/song.mp3");
//!     // ... test logic
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::cache::SongCache;
use crate::model::{CachedSongRecord, Track};
use crate::provider::ResolvedMetadata;

/// Creates an empty song cache backed by a temporary directory.
///
/// Keep the `TempDir` alive for the duration of your test.
pub fn temp_cache() -> (Arc<Mutex<SongCache>>, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let cache = SongCache::load(dir.path().join("song_cache.json"));
    (Arc::new(Mutex::new(cache)), dir)
}

/// Creates a track titled after its file stem.
pub fn mock_track(path: &str) -> Track {
    Track::from_path(path)
}

/// Creates a cached record with sensible defaults.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let custom = CachedSongRecord {
///     song_name: "Custom".to_string(),
///     ..mock_record("/music/a.mp3")
/// };
/// ```
pub fn mock_record(path: &str) -> CachedSongRecord {
    CachedSongRecord {
        file_path: PathBuf::from(path),
        song_name: "Test Song".to_string(),
        artist_name: "Test Artist".to_string(),
        album_name: "Test Album".to_string(),
        cached_artwork_url: Some("https://img.example/600x600bb.jpg".to_string()),
        custom_images: Vec::new(),
    }
}

/// Creates a provider match with sensible defaults.
pub fn mock_metadata() -> ResolvedMetadata {
    ResolvedMetadata {
        song_name: "Remote Song".to_string(),
        artist_name: "Remote Artist".to_string(),
        album_name: "Remote Album".to_string(),
        artwork_url: Some("https://img.example/600x600bb.jpg".to_string()),
    }
}

/// Writes `count` fake image files into `dir` and returns their paths.
pub fn write_images(dir: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("image-{i}.png"));
            std::fs::write(&path, b"fake png").expect("Failed to write image fixture");
            path
        })
        .collect()
}

/// Serves exactly one HTTP response, then closes.
///
/// Returns the base URL and a handle resolving to the raw request head.
pub async fn serve_once(status: &str, body: String) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("No local addr");
    let status = status.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Accept failed");
        let request = read_request_head(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/javascript; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("Write failed");
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

/// Accepts connections and never answers.
pub async fn serve_hanging() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("No local addr");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((mut socket, _)) = listener.accept().await {
            read_request_head(&mut socket).await;
            held.push(socket);
        }
    });

    format!("http://{addr}")
}

async fn read_request_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_cache_starts_empty() {
        let (cache, _dir) = temp_cache();
        assert!(cache.lock().is_empty());
    }

    #[test]
    fn test_write_images() {
        let dir = tempfile::tempdir().unwrap();
        let images = write_images(dir.path(), 3);
        assert_eq!(images.len(), 3);
        assert!(images.iter().all(|p| p.is_file()));
    }

    #[test]
    fn test_mock_track_title() {
        let track = mock_track("/music/Some Song.mp3");
        assert_eq!(track.title, "Some Song");
    }
}
