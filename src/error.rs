//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the
//! CLI/main edge uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`ProviderError`], [`PersistError`],
//!   [`ConfigError`]) for detailed handling
//! - Nothing below the resolver surfaces to the presentation layer; the
//!   resolver absorbs provider and cache failures into a fallback view.
//!
//! # Example
//!
//! ```ignore
//! use tunedeck::error::{Error, Result, ResultExt};
//!
//! fn add(library: &mut Library, path: &Path) -> Result<()> {
//!     library.add_files([path])?;          // Persist errors auto-convert
//!     std::fs::metadata(path).with_context("checking track")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

pub use crate::config::ConfigError;
pub use crate::persist::PersistError;
pub use crate::provider::ProviderError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Library or song cache document could not be written
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Remote metadata lookup failed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Track not in the library
    #[error("Track not found: {0}")]
    NotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, PersistError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Persist(e).context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::not_found("/path/to/file.mp3");
        assert!(err.to_string().contains("/path/to/file.mp3"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(ProviderError::Timeout).context("while resolving track");
        let msg = err.to_string();
        assert!(msg.contains("while resolving track"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::not_found("/music/a.mp3"));
        let with_ctx = result.with_context("additional context");
        assert!(
            with_ctx
                .unwrap_err()
                .to_string()
                .contains("additional context")
        );
    }

    #[test]
    fn test_io_result_ext() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = result.with_context("reading cover").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
        assert!(err.to_string().contains("reading cover"));
    }
}
