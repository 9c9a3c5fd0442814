//! Error types for the kinovod extraction core
//!
//! Provides an error enum with human-readable messages. Fetch-side
//! failures are recovered by the pipeline (they degrade to an empty
//! candidate set); the variants here exist for the few paths that do
//! propagate, and for diagnostics in logs and the error menu.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all kinovod-core operations
#[derive(Error, Debug)]
pub enum KinovodError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Navigation to the target page failed or timed out
    #[error("Navigation failed: {0}")]
    NavigationError(String),

    /// Headless browser could not be launched or driven
    #[error("Browser error: {0}")]
    BrowserError(String),

    /// Failed to parse page content
    #[error("Failed to parse page: {0}")]
    ParseError(String),

    /// Invalid URL supplied as the extraction target
    #[error("Invalid target URL: {0}")]
    InvalidTarget(String),

    /// Target page returned HTTP 404
    #[error("Page not found: {0}")]
    NotFound(String),
}

impl Serialize for KinovodError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for kinovod-core operations
pub type Result<T> = std::result::Result<T, KinovodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_navigation() {
        let error = KinovodError::NavigationError("timeout after 60s".to_string());
        assert_eq!(error.to_string(), "Navigation failed: timeout after 60s");
    }

    #[test]
    fn test_error_display_parse_error() {
        let error = KinovodError::ParseError("bad selector".to_string());
        assert_eq!(error.to_string(), "Failed to parse page: bad selector");
    }

    #[test]
    fn test_error_display_invalid_target() {
        let error = KinovodError::InvalidTarget("not-a-url".to_string());
        assert_eq!(error.to_string(), "Invalid target URL: not-a-url");
    }

    #[test]
    fn test_error_display_not_found() {
        let error = KinovodError::NotFound("https://example.com/film/1".to_string());
        assert_eq!(
            error.to_string(),
            "Page not found: https://example.com/film/1"
        );
    }

    #[test]
    fn test_error_serialize() {
        let error = KinovodError::BrowserError("chromium missing".to_string());
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"Browser error: chromium missing\"");
    }
}
