//! Page signal sources
//!
//! The extraction core never fetches anything itself; it consumes a
//! [`PageSignals`] bundle produced by a [`PageSignalSource`]. Two
//! interchangeable implementations exist, selected per deployment:
//!
//! - [`HttpSignalSource`] — plain GET of the raw markup, cheap and
//!   sufficient when the page server-renders its player config;
//! - [`BrowserSignalSource`] (`browser` feature) — drives headless
//!   Chromium to also observe the requests the player fires and the
//!   `src` attributes it sets after scripts run.

use async_trait::async_trait;
use url::Url;

use crate::client::{ClientConfig, PageClient};
use crate::error::Result;
use crate::types::PageSignals;

/// Capability of acquiring page signals for a target URL
#[async_trait]
pub trait PageSignalSource: Send + Sync {
    async fn collect(&self, target: &Url) -> Result<PageSignals>;
}

/// Signal source backed by a plain HTTP GET
///
/// Fills only the markup signal; the extractor's text and attribute
/// scans do the rest.
pub struct HttpSignalSource {
    client: PageClient,
}

impl HttpSignalSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: PageClient::new()?,
        })
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: PageClient::with_config(config)?,
        })
    }
}

#[async_trait]
impl PageSignalSource for HttpSignalSource {
    async fn collect(&self, target: &Url) -> Result<PageSignals> {
        let html = self.client.fetch(target.as_str()).await?;
        Ok(PageSignals {
            base_url: target.clone(),
            observed_requests: Vec::new(),
            dom_sources: Vec::new(),
            html: Some(html),
        })
    }
}

#[cfg(feature = "browser")]
pub use browser::{BrowserConfig, BrowserSignalSource};

#[cfg(feature = "browser")]
mod browser {
    use std::ffi::OsStr;
    use std::time::Duration;

    use async_trait::async_trait;
    use headless_chrome::{Browser, LaunchOptions};
    use url::Url;

    use crate::error::{KinovodError, Result};
    use crate::types::PageSignals;

    use super::PageSignalSource;

    /// Configuration for the headless-browser signal source
    #[derive(Debug, Clone)]
    pub struct BrowserConfig {
        /// Run Chromium headless (default: true)
        pub headless: bool,
        /// Navigation timeout in seconds (default: 60)
        pub navigation_timeout_secs: u64,
        /// Settle wait after load for late player requests (default: 1s)
        pub settle_wait_ms: u64,
        /// CSS selector of the optional play control to click
        pub play_selector: String,
    }

    impl Default for BrowserConfig {
        fn default() -> Self {
            Self {
                headless: true,
                navigation_timeout_secs: 60,
                settle_wait_ms: 1000,
                play_selector: "button.play".to_string(),
            }
        }
    }

    /// Signal source backed by headless Chromium
    ///
    /// Navigates the target, attempts the optional play click, waits
    /// the settle delay, then collects the request URLs seen by the
    /// page (resource-timing entries), the live `video`/`source`
    /// attributes, and the rendered markup. The whole session runs on
    /// a blocking task because the browser API is synchronous.
    pub struct BrowserSignalSource {
        config: BrowserConfig,
    }

    impl BrowserSignalSource {
        pub fn new() -> Self {
            Self::with_config(BrowserConfig::default())
        }

        pub fn with_config(config: BrowserConfig) -> Self {
            Self { config }
        }
    }

    #[async_trait]
    impl PageSignalSource for BrowserSignalSource {
        async fn collect(&self, target: &Url) -> Result<PageSignals> {
            let config = self.config.clone();
            let target = target.clone();
            tokio::task::spawn_blocking(move || collect_blocking(&target, &config))
                .await
                .map_err(|e| KinovodError::BrowserError(format!("session task failed: {e}")))?
        }
    }

    fn collect_blocking(target: &Url, config: &BrowserConfig) -> Result<PageSignals> {
        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(false)
            .args(vec![
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--disable-gpu"),
            ])
            .build()
            .map_err(|e| KinovodError::BrowserError(e.to_string()))?;

        let browser =
            Browser::new(options).map_err(|e| KinovodError::BrowserError(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| KinovodError::BrowserError(e.to_string()))?;
        tab.set_default_timeout(Duration::from_secs(config.navigation_timeout_secs));

        tab.navigate_to(target.as_str())
            .and_then(|t| t.wait_until_navigated())
            .map_err(|e| {
                KinovodError::NavigationError(format!("could not load {target}: {e}"))
            })?;

        // The play control may be absent or already auto-started; a
        // failed click is not an error.
        let click = format!(
            "var el = document.querySelector('{}'); if (el) el.click();",
            config.play_selector.replace('\'', "\\'")
        );
        if tab.evaluate(&click, false).is_err() {
            tracing::debug!(selector = %config.play_selector, "play control not clickable");
        }

        std::thread::sleep(Duration::from_millis(config.settle_wait_ms));

        let observed_requests = evaluate_string_list(
            &tab,
            "JSON.stringify(performance.getEntriesByType('resource').map(function(e) { return e.name; }))",
        );
        let dom_sources = evaluate_string_list(
            &tab,
            "JSON.stringify(Array.from(document.querySelectorAll('video[src],source[src],source[data-src]')).map(function(el) { return el.getAttribute('src') || el.getAttribute('data-src'); }).filter(Boolean))",
        );
        let html = tab.get_content().ok();

        Ok(PageSignals {
            base_url: target.clone(),
            observed_requests,
            dom_sources,
            html,
        })
    }

    /// Run a script returning a JSON-encoded string array
    fn evaluate_string_list(tab: &headless_chrome::Tab, script: &str) -> Vec<String> {
        let Ok(result) = tab.evaluate(script, false) else {
            return Vec::new();
        };
        result
            .value
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .and_then(|json| serde_json::from_str::<Vec<String>>(&json).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_source_fills_markup_signal() {
        let server = MockServer::start().await;
        let html = r#"<video src="https://cdn.example/v/master.m3u8"></video>"#;
        Mock::given(method("GET"))
            .and(path("/film/113467-gabriel"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&server)
            .await;

        let source = HttpSignalSource::new().unwrap();
        let target = Url::parse(&format!("{}/film/113467-gabriel", server.uri())).unwrap();
        let signals = source.collect(&target).await.unwrap();

        assert_eq!(signals.base_url, target);
        assert!(signals.observed_requests.is_empty());
        assert!(signals.dom_sources.is_empty());
        assert_eq!(signals.html.as_deref(), Some(html));
    }

    #[tokio::test]
    async fn test_http_source_propagates_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpSignalSource::new().unwrap();
        let target = Url::parse(&format!("{}/gone", server.uri())).unwrap();
        assert!(source.collect(&target).await.is_err());
    }
}
