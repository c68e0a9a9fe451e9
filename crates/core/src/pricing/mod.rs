//! Price resolution for the shared pool.
//!
//! - [`model`] - resolved holdings, provenance tags, price series
//! - [`client`] - facade over the `sharefolio-market-data` providers
//! - [`resolution_service`] - the resolution engine itself
//! - [`cache`] - bounded-staleness caching around the engine
//!
//! ```text
//! CachedResolutionService → PriceResolutionService → MarketDataClient → provider
//! ```

pub mod cache;
pub mod client;
pub mod model;
pub mod resolution_service;

#[cfg(test)]
mod resolution_service_tests;

pub use cache::{holdings_version, CacheKey, CachedResolutionService, ResolutionCache};
pub use client::{MarketDataClient, MarketDataClientTrait};
pub use model::{HistoryPeriod, PriceSeries, PriceSource, Resolution, ResolvedHolding};
pub use resolution_service::{PriceResolutionService, PriceResolutionServiceTrait};
