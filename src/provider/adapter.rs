//! Adapter layer: Convert search DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use super::dto;
use super::domain::ResolvedMetadata;

/// Resolution token embedded in every thumbnail URL the API hands out.
pub const THUMBNAIL_TOKEN: &str = "100x100";

/// Convert a search response into the best (first) match.
///
/// An empty result list, or a first entry without any usable name, is no
/// match.
pub fn to_metadata(response: dto::SearchResponse, artwork_size: u32) -> Option<ResolvedMetadata> {
    let first = response.results.into_iter().next()?;

    let metadata = ResolvedMetadata {
        song_name: clean(first.track_name),
        artist_name: clean(first.artist_name),
        album_name: clean(first.collection_name),
        artwork_url: first
            .artwork_url100
            .filter(|url| !url.trim().is_empty())
            .map(|url| upscale_artwork(&url, artwork_size)),
    };

    if metadata.song_name.is_empty()
        && metadata.artist_name.is_empty()
        && metadata.album_name.is_empty()
    {
        return None;
    }

    Some(metadata)
}

/// Rewrite the thumbnail resolution token to request a `size`×`size` image.
///
/// URLs without the token are returned unchanged.
pub fn upscale_artwork(url: &str, size: u32) -> String {
    if !url.contains(THUMBNAIL_TOKEN) {
        return url.to_string();
    }
    url.replace(THUMBNAIL_TOKEN, &format!("{size}x{size}"))
}

fn clean(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: Option<&str>, artwork: Option<&str>) -> dto::SearchTrack {
        dto::SearchTrack {
            track_name: name.map(String::from),
            artist_name: Some("Artist".to_string()),
            collection_name: Some("Album".to_string()),
            artwork_url100: artwork.map(String::from),
        }
    }

    #[test]
    fn test_upscale_rewrites_token() {
        assert_eq!(
            upscale_artwork("https://img.example/x/100x100bb.jpg", 600),
            "https://img.example/x/600x600bb.jpg"
        );
    }

    #[test]
    fn test_upscale_leaves_other_urls_alone() {
        let url = "https://img.example/x/cover.jpg";
        assert_eq!(upscale_artwork(url, 600), url);
    }

    #[test]
    fn test_first_result_wins() {
        let response = dto::SearchResponse {
            result_count: 2,
            results: vec![
                track(Some("First"), Some("https://a/100x100bb.jpg")),
                track(Some("Second"), None),
            ],
        };

        let meta = to_metadata(response, 300).unwrap();
        assert_eq!(meta.song_name, "First");
        assert_eq!(meta.artist_name, "Artist");
        assert_eq!(meta.album_name, "Album");
        assert_eq!(meta.artwork_url.as_deref(), Some("https://a/300x300bb.jpg"));
    }

    #[test]
    fn test_empty_results_is_no_match() {
        assert!(to_metadata(dto::SearchResponse::default(), 600).is_none());
    }

    #[test]
    fn test_nameless_entry_is_no_match() {
        let response = dto::SearchResponse {
            result_count: 1,
            results: vec![dto::SearchTrack::default()],
        };
        assert!(to_metadata(response, 600).is_none());
    }

    #[test]
    fn test_blank_artwork_is_dropped() {
        let response = dto::SearchResponse {
            result_count: 1,
            results: vec![track(Some("Song"), Some("  "))],
        };
        assert!(to_metadata(response, 600).unwrap().artwork_url.is_none());
    }
}
