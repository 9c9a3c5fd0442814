//! Kinovod manifest-extraction core
//!
//! Extracts HTTP Live Streaming manifest links (`.m3u8` URLs) from a
//! fixed movie page and renders them as a menu consumable by a Media
//! Station X (MSX) remote-control UI.
//!
//! # Overview
//!
//! The pipeline runs in five steps, each its own module:
//! - a [`PageSignalSource`] acquires page signals (plain HTTP fetch, or
//!   headless Chromium with the `browser` feature);
//! - the [`extract`](extract()) scans harvest candidate links from
//!   observed requests, DOM attributes, inline scripts, the raw markup,
//!   and quoted JSON blobs;
//! - [`is_valid_manifest_link`] filters the candidates;
//! - [`render_menu`] builds the fixed MSX menu JSON, classifying each
//!   link with [`QualityLabel`];
//! - [`MenuCache`] memoizes the result for five minutes per target.
//!
//! [`MenuService`] wires the steps together behind the cache.
//!
//! # Example
//!
//! ```no_run
//! use kinovod_core::{HttpSignalSource, MenuService, Result, Target};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let target = Target::new("https://kinovod270825.pro/film/113467-gabriel", "Gabriel")?;
//!     let source = Box::new(HttpSignalSource::new()?);
//!     let service = MenuService::new(source, target);
//!
//!     let menu = service.menu().await?;
//!     println!("{}", serde_json::to_string_pretty(&menu).unwrap());
//!     Ok(())
//! }
//! ```
//!
//! A fetch failure never surfaces here: the service renders the fixed
//! "not found" sentinel menu instead, and `refresh` is the manual
//! retry.

mod cache;
mod client;
mod error;
mod extract;
mod render;
mod service;
mod source;
mod types;
mod validate;

// Re-export client types
pub use client::{ClientConfig, PageClient};

// Re-export error types
pub use error::{KinovodError, Result};

// Re-export the extraction pipeline pieces
pub use extract::extract;
pub use render::{render_error_menu, render_menu};
pub use validate::is_valid_manifest_link;

// Re-export cache and service API
pub use cache::{MenuCache, DEFAULT_TTL};
pub use service::{MenuService, RefreshOutcome, Target};

// Re-export signal sources
#[cfg(feature = "browser")]
pub use source::{BrowserConfig, BrowserSignalSource};
pub use source::{HttpSignalSource, PageSignalSource};

// Re-export data types
pub use types::{Menu, MenuItem, MenuTemplate, PageSignals, QualityLabel};
