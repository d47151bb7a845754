//! iTunes Search API Data Transfer Objects
//!
//! API Reference:
//! https://developer.apple.com/library/archive/documentation/AudioVideo/Conceptual/iTuneSearchAPI/

use serde::{Deserialize, Serialize};

/// Top-level search response
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<SearchTrack>,
}

/// A single track entry. Every field is optional upstream.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTrack {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
    pub artwork_url100: Option<String>,
}
