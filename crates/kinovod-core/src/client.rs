//! HTTP client for fetching the target page
//!
//! One GET per cache miss, with a browser-like User-Agent and a
//! navigation timeout. No automatic retries: a failed fetch degrades to
//! the sentinel menu, and `/msx/refresh` is the manual retry mechanism.

use std::time::Duration;

use crate::error::{KinovodError, Result};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the page client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Navigation timeout in seconds (default: 60)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 60 }
    }
}

/// Thin reqwest wrapper used by the HTTP signal source
pub struct PageClient {
    client: reqwest::Client,
}

impl PageClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()
            .map_err(KinovodError::HttpError)?;

        Ok(Self { client })
    }

    /// Fetch the markup of a page
    ///
    /// # Errors
    /// - `NotFound` when the server answers 404
    /// - `HttpError` for network failures, timeouts, and 5xx statuses
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(KinovodError::HttpError)?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(KinovodError::NotFound(url.to_string()));
        }

        if status.is_server_error() {
            return Err(KinovodError::HttpError(
                response.error_for_status().unwrap_err(),
            ));
        }

        response.text().await.map_err(KinovodError::HttpError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_client_creation() {
        assert!(PageClient::new().is_ok());
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/film/113467-gabriel"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let client = PageClient::new().unwrap();
        let body = client
            .fetch(&format!("{}/film/113467-gabriel", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = PageClient::new().unwrap();
        let result = client.fetch(&format!("{}/missing", server.uri())).await;
        assert!(matches!(result, Err(KinovodError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_fetch_maps_5xx_to_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = PageClient::new().unwrap();
        let result = client.fetch(&format!("{}/down", server.uri())).await;
        assert!(matches!(result, Err(KinovodError::HttpError(_))));
    }
}
