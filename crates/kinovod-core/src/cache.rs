//! Time-bounded result cache
//!
//! One slot per target key holding the last rendered menu. A slot is
//! fresh while its age is under the TTL; stale or empty slots recompute
//! on demand. Each slot carries its own async mutex, held across the
//! compute, so overlapping callers of the same stale key await the
//! first computation instead of fetching the page twice. Distinct keys
//! share no state.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::types::Menu;

/// Default freshness window
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Default)]
struct Slot {
    menu: Option<Menu>,
    computed_at: Option<Instant>,
}

impl Slot {
    fn fresh_menu(&self, ttl: Duration) -> Option<&Menu> {
        let computed_at = self.computed_at?;
        if computed_at.elapsed() < ttl {
            self.menu.as_ref()
        } else {
            None
        }
    }
}

/// TTL cache mapping target keys to rendered menus
pub struct MenuCache {
    ttl: Duration,
    slots: Mutex<HashMap<String, Arc<Mutex<Slot>>>>,
}

impl MenuCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached menu for `key`, computing it when stale
    ///
    /// A fresh slot answers without invoking `compute`. Otherwise
    /// `compute` runs under the slot lock, its result is stored with
    /// the current instant, and the new menu is returned. A failed
    /// compute stores nothing and the error propagates.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> Result<Menu>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Menu>>,
    {
        let slot = self.slot(key).await;
        let mut guard = slot.lock().await;

        if let Some(menu) = guard.fresh_menu(self.ttl) {
            tracing::debug!(key, "serving menu from cache");
            return Ok(menu.clone());
        }

        let menu = compute().await?;
        guard.menu = Some(menu.clone());
        guard.computed_at = Some(Instant::now());
        Ok(menu)
    }

    /// Force the next `get_or_compute` for `key` to recompute
    ///
    /// Clears the timestamp only; the stale data stays in the slot
    /// until the recompute replaces it.
    pub async fn invalidate(&self, key: &str) {
        let slot = self.slot(key).await;
        let mut guard = slot.lock().await;
        guard.computed_at = None;
    }

    /// Whether a fresh menu is currently stored for `key`
    pub async fn is_populated(&self, key: &str) -> bool {
        let slot = self.slot(key).await;
        let guard = slot.lock().await;
        guard.fresh_menu(self.ttl).is_some()
    }

    /// Get or create the slot for `key`
    ///
    /// The outer map lock is held only for the lookup, never across a
    /// compute.
    async fn slot(&self, key: &str) -> Arc<Mutex<Slot>> {
        let mut slots = self.slots.lock().await;
        slots
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Slot::default())))
            .clone()
    }
}

impl Default for MenuCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
