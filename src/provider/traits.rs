//! Trait definition for the metadata provider.
//!
//! The resolver is generic over [`MetadataProvider`] so tests can swap the
//! HTTP client for a mock that counts calls or holds a lookup open.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::client::ItunesClient;
use super::domain::{ProviderError, ResolvedMetadata};

/// Remote lookup by free-text query.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Return the single best match, `Ok(None)` when there is none.
    ///
    /// Implementations must observe `token` and return
    /// [`ProviderError::Cancelled`] promptly once it fires.
    async fn search(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> Result<Option<ResolvedMetadata>, ProviderError>;

    /// Download artwork bytes.
    async fn fetch_artwork(
        &self,
        url: &str,
        token: &CancellationToken,
    ) -> Result<Vec<u8>, ProviderError>;
}

#[async_trait]
impl MetadataProvider for ItunesClient {
    async fn search(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> Result<Option<ResolvedMetadata>, ProviderError> {
        ItunesClient::search(self, query, token).await
    }

    async fn fetch_artwork(
        &self,
        url: &str,
        token: &CancellationToken,
    ) -> Result<Vec<u8>, ProviderError> {
        ItunesClient::fetch_artwork(self, url, token).await
    }
}

/// Mock provider for testing.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Holds one query open until released.
    #[derive(Default)]
    pub struct Gate {
        pub query: String,
        /// Notified when the gated lookup starts waiting
        pub started: Notify,
        /// Notify to let the gated lookup finish
        pub release: Notify,
    }

    /// Mock provider returning a canned outcome and recording every query.
    pub struct MockProvider {
        /// Outcome for every search
        pub outcome: Result<Option<ResolvedMetadata>, ProviderError>,
        /// Gated query; ignores cancellation while held
        pub gate: Option<Arc<Gate>>,
        calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn with_outcome(outcome: Result<Option<ResolvedMetadata>, ProviderError>) -> Self {
            Self {
                outcome,
                gate: None,
                calls: AtomicUsize::new(0),
                queries: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock that finds nothing.
        pub fn no_match() -> Self {
            Self::with_outcome(Ok(None))
        }

        /// Create a mock that always returns `metadata`.
        pub fn single_match(metadata: ResolvedMetadata) -> Self {
            Self::with_outcome(Ok(Some(metadata)))
        }

        /// Create a mock that returns an error.
        pub fn with_error(error: ProviderError) -> Self {
            Self::with_outcome(Err(error))
        }

        /// Hold lookups for `query` open until the returned gate is released.
        pub fn gated(mut self, query: &str) -> (Self, Arc<Gate>) {
            let gate = Arc::new(Gate {
                query: query.to_string(),
                ..Default::default()
            });
            self.gate = Some(gate.clone());
            (self, gate)
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn queries(&self) -> Vec<String> {
            self.queries.lock().clone()
        }
    }

    #[async_trait]
    impl MetadataProvider for MockProvider {
        async fn search(
            &self,
            query: &str,
            _token: &CancellationToken,
        ) -> Result<Option<ResolvedMetadata>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().push(query.to_string());

            if let Some(gate) = self.gate.as_ref().filter(|g| g.query == query) {
                gate.started.notify_one();
                gate.release.notified().await;
            }

            self.outcome.clone()
        }

        async fn fetch_artwork(
            &self,
            url: &str,
            token: &CancellationToken,
        ) -> Result<Vec<u8>, ProviderError> {
            if token.is_cancelled() {
                return Err(ProviderError::Cancelled);
            }
            match &self.outcome {
                Err(e) => Err(e.clone()),
                Ok(_) => Ok(url.as_bytes().to_vec()),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_no_match() {
            let mock = MockProvider::no_match();
            let result = mock.search("x", &CancellationToken::new()).await;
            assert_eq!(result, Ok(None));
            assert_eq!(mock.calls(), 1);
        }

        #[tokio::test]
        async fn test_mock_records_queries() {
            let mock = MockProvider::single_match(ResolvedMetadata {
                song_name: "Song".to_string(),
                ..Default::default()
            });
            mock.search("a", &CancellationToken::new()).await.unwrap();
            mock.search("b", &CancellationToken::new()).await.unwrap();
            assert_eq!(mock.queries(), vec!["a".to_string(), "b".to_string()]);
        }

        #[tokio::test]
        async fn test_mock_error() {
            let mock = MockProvider::with_error(ProviderError::Timeout);
            let result = mock.search("x", &CancellationToken::new()).await;
            assert_eq!(result, Err(ProviderError::Timeout));
        }
    }
}
