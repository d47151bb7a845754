//! Internal domain models for remote lookups.
//!
//! These types don't change when the search API changes; responses get
//! converted into them by the adapter.

/// Best match returned by a search. Transient, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub song_name: String,
    pub artist_name: String,
    pub album_name: String,
    /// Artwork URL, already upscaled
    pub artwork_url: Option<String>,
}

/// Errors that can occur during a lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("HTTP {0}")]
    Http(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Lookup cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Http(status.as_u16())
        } else {
            Self::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(ProviderError::Http(503).to_string(), "HTTP 503");
        assert!(ProviderError::Timeout.to_string().contains("timed out"));
        assert_eq!(ProviderError::Cancelled.to_string(), "Lookup cancelled");
    }
}
