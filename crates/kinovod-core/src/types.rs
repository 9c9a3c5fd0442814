//! Core data types for the kinovod extraction pipeline
//!
//! Contains the page-signal bundle produced by fetchers, the quality
//! label derived from URL text, and the MSX menu shapes returned to
//! the media UI. All menu types serialize to the exact JSON the MSX
//! frontend consumes, so field names and literal values here are
//! contract, not decoration.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Signals captured from the target page by a [`PageSignalSource`]
///
/// Every field may be empty; the extractor applies whichever scans the
/// available signals allow and unions the results.
///
/// [`PageSignalSource`]: crate::PageSignalSource
#[derive(Debug, Clone)]
pub struct PageSignals {
    /// Base URL of the page, used to resolve relative links
    pub base_url: Url,

    /// Request URLs observed while the page loaded (browser fetcher only)
    pub observed_requests: Vec<String>,

    /// `src`/`data-src` values collected from the live DOM (browser fetcher only)
    pub dom_sources: Vec<String>,

    /// Raw or rendered page markup
    pub html: Option<String>,
}

impl PageSignals {
    /// Create an empty signal bundle for the given base URL
    ///
    /// Used when the fetch fails outright: the extractor then finds
    /// nothing and the pipeline renders the sentinel menu.
    pub fn empty(base_url: Url) -> Self {
        Self {
            base_url,
            observed_requests: Vec::new(),
            dom_sources: Vec::new(),
            html: None,
        }
    }
}

/// Coarse resolution label derived from URL text pattern-matching
///
/// The label reflects what the URL claims, not what the stream actually
/// carries; nothing here inspects the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLabel {
    #[serde(rename = "1080p")]
    FullHd,
    #[serde(rename = "720p")]
    Hd,
    #[serde(rename = "480p")]
    Sd,
    #[serde(rename = "360p")]
    Low,
    Auto,
}

impl QualityLabel {
    /// Classify a URL by case-insensitive substring tests in strict
    /// priority order: `1080`/`fhd`, then `720`/`hd`, then `480`, then
    /// `360`, else `Auto`. First match wins — a URL containing both
    /// `1080` and `hd` is `1080p`.
    pub fn classify(url: &str) -> Self {
        let lower = url.to_lowercase();
        if lower.contains("1080") || lower.contains("fhd") {
            Self::FullHd
        } else if lower.contains("720") || lower.contains("hd") {
            Self::Hd
        } else if lower.contains("480") {
            Self::Sd
        } else if lower.contains("360") {
            Self::Low
        } else {
            Self::Auto
        }
    }

    /// The label text used in menu item titles
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullHd => "1080p",
            Self::Hd => "720p",
            Self::Sd => "480p",
            Self::Low => "360p",
            Self::Auto => "Auto",
        }
    }
}

impl fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the MSX menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,

    #[serde(rename = "playerLabel")]
    pub player_label: String,

    /// MSX action string: `video:{url}` for playable entries,
    /// `info:{text}` for messages shown to the user
    pub action: String,

    pub icon: String,
}

/// Fixed structural template attached to successful menus
///
/// The MSX frontend keys its layout off these exact values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuTemplate {
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub layout: String,
    pub icon: String,
    pub color: String,
}

impl Default for MenuTemplate {
    fn default() -> Self {
        Self {
            tag: "Web".to_string(),
            kind: "separate".to_string(),
            layout: "0,0,2,4".to_string(),
            icon: "msx-white-soft:movie".to_string(),
            color: "msx-glass".to_string(),
        }
    }
}

/// Top-level MSX menu response
///
/// `kind` serializes as `type` and is always `"pages"`. Error menus
/// carry no template, matching the shape the frontend already accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(rename = "type")]
    pub kind: String,

    pub headline: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<MenuTemplate>,

    pub items: Vec<MenuItem>,
}
