//! Bounded-staleness cache over resolution results.
//!
//! The dashboard refreshes on every interaction; the cache keeps each
//! resolution result for a fixed window so the provider is queried at most
//! once per window per holding set. Keys carry a version hash of the
//! holding set, so a configuration change naturally misses, and
//! [`ResolutionCache::invalidate`] forces a refetch on demand.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use crate::constants::RESOLUTION_CACHE_TTL;
use crate::holdings::Holding;

use super::model::{HistoryPeriod, Resolution};
use super::resolution_service::PriceResolutionServiceTrait;

/// Cache key: which holding set, and which kind of resolution.
///
/// `period` is `None` for current-price resolution and the window for
/// historical resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub holdings_version: u64,
    pub period: Option<HistoryPeriod>,
}

/// Stable hash of a holding set, used as the cache key component.
pub fn holdings_version(holdings: &[Holding]) -> u64 {
    let mut hasher = DefaultHasher::new();
    holdings.hash(&mut hasher);
    hasher.finish()
}

struct CacheEntry {
    resolution: Resolution,
    inserted_at: Instant,
}

/// TTL-bounded map from [`CacheKey`] to [`Resolution`].
pub struct ResolutionCache {
    entries: DashMap<CacheKey, CacheEntry>,
    ttl: Duration,
}

impl ResolutionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Cache with the standard five-minute freshness window.
    pub fn with_default_ttl() -> Self {
        Self::new(RESOLUTION_CACHE_TTL)
    }

    /// Returns the cached resolution if it is still fresh.
    pub fn get(&self, key: &CacheKey) -> Option<Resolution> {
        let stale = match self.entries.get(key) {
            Some(entry) => {
                if entry.inserted_at.elapsed() < self.ttl {
                    return Some(entry.resolution.clone());
                }
                true
            }
            None => false,
        };
        if stale {
            self.entries.remove(key);
        }
        None
    }

    pub fn insert(&self, key: CacheKey, resolution: Resolution) {
        self.entries.insert(
            key,
            CacheEntry {
                resolution,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop everything; the next refresh hits the provider again.
    pub fn invalidate(&self) {
        self.entries.clear();
    }
}

/// Resolution service wrapper that consults the cache first.
///
/// The engine itself stays cache-unaware; composition keeps the refresh
/// policy swappable.
pub struct CachedResolutionService {
    inner: std::sync::Arc<dyn PriceResolutionServiceTrait>,
    cache: ResolutionCache,
}

impl CachedResolutionService {
    pub fn new(inner: std::sync::Arc<dyn PriceResolutionServiceTrait>) -> Self {
        Self {
            inner,
            cache: ResolutionCache::with_default_ttl(),
        }
    }

    pub fn with_cache(
        inner: std::sync::Arc<dyn PriceResolutionServiceTrait>,
        cache: ResolutionCache,
    ) -> Self {
        Self { inner, cache }
    }

    /// Force the next resolution to refetch.
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    async fn resolve_with_key(&self, holdings: &[Holding], key: CacheKey) -> Resolution {
        if let Some(cached) = self.cache.get(&key) {
            debug!("Resolution cache hit for {:?}", key);
            return cached;
        }
        let resolution = match key.period {
            Some(period) => self.inner.resolve_historical(holdings, period).await,
            None => self.inner.resolve(holdings).await,
        };
        self.cache.insert(key, resolution.clone());
        resolution
    }
}

#[async_trait]
impl PriceResolutionServiceTrait for CachedResolutionService {
    async fn resolve(&self, holdings: &[Holding]) -> Resolution {
        let key = CacheKey {
            holdings_version: holdings_version(holdings),
            period: None,
        };
        self.resolve_with_key(holdings, key).await
    }

    async fn resolve_historical(&self, holdings: &[Holding], period: HistoryPeriod) -> Resolution {
        let key = CacheKey {
            holdings_version: holdings_version(holdings),
            period: Some(period),
        };
        self.resolve_with_key(holdings, key).await
    }
}
