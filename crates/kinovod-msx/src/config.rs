//! Server configuration
//!
//! Environment variables with hardcoded defaults, read once at
//! startup. The target page is fixed per deployment.

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TARGET_URL: &str = "https://kinovod270825.pro/film/113467-gabriel";
const DEFAULT_TITLE: &str = "Gabriel";

/// Which page fetcher the service runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetcherKind {
    /// Plain HTTP GET of the raw markup
    Http,
    /// Headless Chromium session (needs the `browser` cargo feature)
    Browser,
}

impl FetcherKind {
    fn parse(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("browser") => Self::Browser,
            _ => Self::Http,
        }
    }
}

/// Runtime configuration for the bridge server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub target_url: String,
    pub title: String,
    pub fetcher: FetcherKind,
    /// Base URL the search catalog uses for `content:` actions
    pub public_base: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = parse_port(env::var("PORT").ok());
        Self {
            port,
            target_url: env::var("KINOVOD_TARGET_URL")
                .unwrap_or_else(|_| DEFAULT_TARGET_URL.to_string()),
            title: env::var("KINOVOD_TITLE").unwrap_or_else(|_| DEFAULT_TITLE.to_string()),
            fetcher: FetcherKind::parse(env::var("KINOVOD_FETCHER").ok()),
            public_base: env::var("KINOVOD_PUBLIC_BASE")
                .unwrap_or_else(|_| format!("http://localhost:{port}")),
        }
    }
}

fn parse_port(value: Option<String>) -> u16 {
    value
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_default() {
        assert_eq!(parse_port(None), 8080);
        assert_eq!(parse_port(Some("not-a-port".to_string())), 8080);
    }

    #[test]
    fn test_parse_port_explicit() {
        assert_eq!(parse_port(Some("3000".to_string())), 3000);
    }

    #[test]
    fn test_fetcher_kind_defaults_to_http() {
        assert_eq!(FetcherKind::parse(None), FetcherKind::Http);
        assert_eq!(FetcherKind::parse(Some("plain".to_string())), FetcherKind::Http);
    }

    #[test]
    fn test_fetcher_kind_browser() {
        assert_eq!(
            FetcherKind::parse(Some("browser".to_string())),
            FetcherKind::Browser
        );
    }
}
