//! Market data provider trait definitions.

pub mod yahoo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source. The
/// portfolio engine only ever sees this trait, never a concrete provider.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and for
    /// tagging quotes with their source.
    fn id(&self) -> &'static str;

    /// Fetch the most recent trading sessions for a symbol.
    ///
    /// Returns up to the last two sessions, ordered by timestamp ascending,
    /// so callers can derive both the current price and the previous close.
    async fn get_recent_quotes(&self, symbol: &str) -> Result<Vec<Quote>, MarketDataError>;

    /// Fetch historical quotes for a symbol over a date range.
    ///
    /// The quotes are ordered by timestamp ascending. An empty range yields
    /// `MarketDataError::NoDataForRange`.
    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError>;
}
