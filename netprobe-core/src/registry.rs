//! Insertion-ordered, concurrency-safe collection of probe targets.
//!
//! Callers may add or remove targets at any time. The scheduler works on a
//! [`Registry::snapshot`] taken at the start of each cycle, so a target added
//! mid-cycle is probed no later than the following cycle.

use crate::error::{Error, Result};
use crate::site::{Site, Target};
use crate::types::{SiteId, DEFAULT_NUM_SAMPLES};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Registered probe targets keyed by id, iterated in insertion order.
#[derive(Debug)]
pub struct Registry {
    sites: RwLock<IndexMap<SiteId, Arc<Site>>>,
    next_id: AtomicU64,
    default_samples: usize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_SAMPLES)
    }
}

impl Registry {
    /// Empty registry; targets without a window size get `default_samples`.
    pub fn new(default_samples: usize) -> Self {
        Self {
            sites: RwLock::new(IndexMap::new()),
            next_id: AtomicU64::new(1),
            default_samples,
        }
    }

    /// Register a target and return the created site.
    pub fn add(&self, target: Target) -> Result<Arc<Site>> {
        let id = SiteId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let site = Arc::new(Site::new(id, target, self.default_samples)?);
        self.sites.write().insert(id, Arc::clone(&site));
        debug!(site = %site, %id, "registered probe target");
        Ok(site)
    }

    /// Unregister a target. Order of the remaining targets is preserved.
    pub fn remove(&self, id: SiteId) -> Result<Arc<Site>> {
        let removed = self.sites.write().shift_remove(&id);
        match removed {
            Some(site) => {
                debug!(site = %site, %id, "removed probe target");
                Ok(site)
            }
            None => Err(Error::NotFound(id)),
        }
    }

    /// Look a site up by id.
    pub fn get(&self, id: SiteId) -> Option<Arc<Site>> {
        self.sites.read().get(&id).cloned()
    }

    /// Current targets in registration order.
    pub fn snapshot(&self) -> Vec<Arc<Site>> {
        self.sites.read().values().cloned().collect()
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.sites.read().len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.sites.read().is_empty()
    }

    /// Drop every target.
    pub fn clear(&self) {
        self.sites.write().clear();
    }
}
