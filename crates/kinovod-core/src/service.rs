//! High-level menu service
//!
//! Ties the pipeline together: collect signals, extract candidates,
//! validate, render, cache. This is the API the serving layer calls;
//! everything below it is pure plumbing around these steps.

use url::Url;

use crate::cache::MenuCache;
use crate::error::{KinovodError, Result};
use crate::extract::extract;
use crate::render::render_menu;
use crate::source::PageSignalSource;
use crate::types::{Menu, PageSignals};
use crate::validate::is_valid_manifest_link;

/// The fixed page whose manifest links are extracted
#[derive(Debug, Clone)]
pub struct Target {
    pub url: Url,
    pub title: String,
}

impl Target {
    /// # Errors
    /// Returns `InvalidTarget` when `url` is not an absolute URL.
    pub fn new(url: &str, title: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|_| KinovodError::InvalidTarget(url.to_string()))?;
        Ok(Self {
            url,
            title: title.to_string(),
        })
    }
}

/// Result of a forced recompute
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub menu: Menu,
    /// Validated links found — the sentinel item never counts here
    pub videos_found: usize,
}

/// Cache-fronted extraction pipeline for one target
pub struct MenuService {
    source: Box<dyn PageSignalSource>,
    cache: MenuCache,
    target: Target,
}

impl MenuService {
    pub fn new(source: Box<dyn PageSignalSource>, target: Target) -> Self {
        Self::with_cache(source, target, MenuCache::default())
    }

    pub fn with_cache(source: Box<dyn PageSignalSource>, target: Target, cache: MenuCache) -> Self {
        Self {
            source,
            cache,
            target,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// The menu for the target, served from cache while fresh
    pub async fn menu(&self) -> Result<Menu> {
        self.cache
            .get_or_compute(self.target.url.as_str(), || async {
                Ok(self.build().await.menu)
            })
            .await
    }

    /// Invalidate the cache and recompute immediately
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let key = self.target.url.as_str();
        self.cache.invalidate(key).await;

        let outcome = self.build().await;
        let menu = outcome.menu.clone();
        self.cache.get_or_compute(key, || async move { Ok(menu) }).await?;

        Ok(outcome)
    }

    /// Whether a fresh menu is cached for the target
    pub async fn is_cached(&self) -> bool {
        self.cache.is_populated(self.target.url.as_str()).await
    }

    /// Run the extraction pipeline once
    ///
    /// A fetch failure is recovered here: the extractor gets an empty
    /// signal bundle and the renderer produces the sentinel menu. The
    /// service always yields a renderable menu, never a fetch error.
    async fn build(&self) -> RefreshOutcome {
        let signals = match self.source.collect(&self.target.url).await {
            Ok(signals) => signals,
            Err(e) => {
                tracing::warn!(target = %self.target.url, error = %e, "page fetch failed, rendering empty menu");
                PageSignals::empty(self.target.url.clone())
            }
        };

        let candidates = extract(&signals);
        let validated: Vec<String> = candidates
            .into_iter()
            .filter(|c| is_valid_manifest_link(c))
            .collect();

        tracing::info!(
            target = %self.target.url,
            found = validated.len(),
            "extraction finished"
        );

        RefreshOutcome {
            videos_found: validated.len(),
            menu: render_menu(&validated, &self.target.title),
        }
    }
}
