//! Market data client - facade for the market-data crate.
//!
//! The resolution engine talks to [`MarketDataClientTrait`] only; this
//! module provides the production implementation backed by a provider from
//! `sharefolio-market-data`. Tests substitute a mock.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::debug;

use sharefolio_market_data::{MarketDataError, MarketDataProvider, Quote, YahooProvider};

use super::model::{HistoryPeriod, PriceSeries};

/// Capability consumed by the resolution engine: given a symbol (and
/// optionally a time range), return a price series or fail.
#[async_trait]
pub trait MarketDataClientTrait: Send + Sync {
    /// Series covering the most recent trading sessions (up to two).
    async fn get_recent(&self, symbol: &str) -> Result<PriceSeries, MarketDataError>;

    /// Series covering the lookback window of `period`.
    async fn get_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<PriceSeries, MarketDataError>;
}

/// Production client over a concrete market data provider.
pub struct MarketDataClient {
    provider: Arc<dyn MarketDataProvider>,
}

impl MarketDataClient {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Convenience constructor wiring up the shipped Yahoo provider.
    pub fn with_yahoo() -> Result<Self, MarketDataError> {
        Ok(Self::new(Arc::new(YahooProvider::new()?)))
    }

    fn series_from(quotes: Vec<Quote>) -> PriceSeries {
        let mut series = PriceSeries::default();
        for quote in quotes {
            series.closes.push(quote.close);
            series.opens.push(quote.open);
        }
        series
    }
}

#[async_trait]
impl MarketDataClientTrait for MarketDataClient {
    async fn get_recent(&self, symbol: &str) -> Result<PriceSeries, MarketDataError> {
        debug!("Fetching recent quotes for {}", symbol);
        let quotes = self.provider.get_recent_quotes(symbol).await?;
        Ok(Self::series_from(quotes))
    }

    async fn get_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<PriceSeries, MarketDataError> {
        debug!("Fetching {} history for {}", period.as_str(), symbol);
        let end = Utc::now();
        let start = end - Duration::days(period.lookback_days());
        let quotes = self
            .provider
            .get_historical_quotes(symbol, start, end)
            .await?;
        Ok(Self::series_from(quotes))
    }
}
