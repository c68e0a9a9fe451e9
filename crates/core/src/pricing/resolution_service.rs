//! Price resolution engine.
//!
//! Turns the static holding configuration into a fresh set of
//! [`ResolvedHolding`]s once per refresh cycle. Every holding always comes
//! back with a usable price: live data when the provider cooperates, the
//! configured baseline price otherwise. A failure on one symbol never
//! affects the others and is never raised to the caller; affected symbols
//! are only reported in [`Resolution::failed_symbols`].

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::constants::PERCENT_PRECISION;
use crate::holdings::Holding;

use super::client::MarketDataClientTrait;
use super::model::{HistoryPeriod, PriceSeries, PriceSource, Resolution, ResolvedHolding};

#[async_trait]
pub trait PriceResolutionServiceTrait: Send + Sync {
    /// Resolve a current price for every holding.
    async fn resolve(&self, holdings: &[Holding]) -> Resolution;

    /// Resolve prices plus the percentage change over `period`.
    async fn resolve_historical(&self, holdings: &[Holding], period: HistoryPeriod) -> Resolution;
}

pub struct PriceResolutionService {
    client: Arc<dyn MarketDataClientTrait>,
}

impl PriceResolutionService {
    pub fn new(client: Arc<dyn MarketDataClientTrait>) -> Self {
        Self { client }
    }

    /// Cash never hits the provider: its baseline price is the price.
    fn resolve_cash(holding: &Holding, period: Option<HistoryPeriod>) -> ResolvedHolding {
        ResolvedHolding {
            current_price: holding.baseline_price,
            previous_close: Some(holding.baseline_price),
            price_source: PriceSource::Fixed,
            historical_change_pct: period.map(|_| Decimal::ZERO),
            period,
            ..ResolvedHolding::from_holding(holding)
        }
    }

    /// Baseline fallback for a failed or empty live lookup.
    fn resolve_fallback(holding: &Holding, period: Option<HistoryPeriod>) -> ResolvedHolding {
        ResolvedHolding {
            current_price: holding.baseline_price,
            previous_close: Some(holding.baseline_price),
            price_source: PriceSource::Default,
            historical_change_pct: period.map(|_| Decimal::ZERO),
            period,
            ..ResolvedHolding::from_holding(holding)
        }
    }

    async fn resolve_one(&self, holding: &Holding) -> ResolvedHolding {
        if holding.is_cash() {
            return Self::resolve_cash(holding, None);
        }

        match self.client.get_recent(&holding.symbol).await {
            Ok(series) if !series.is_empty() => {
                let current_price = series.latest_close().unwrap_or(holding.baseline_price);
                // Second-to-latest close preferred, latest session open as
                // a stand-in when only one session came back.
                let previous_close = series.previous_close().or_else(|| series.latest_open());
                ResolvedHolding {
                    current_price,
                    previous_close,
                    price_source: PriceSource::Live,
                    ..ResolvedHolding::from_holding(holding)
                }
            }
            Ok(_) => {
                warn!(
                    "Empty price series for {}; using baseline price",
                    holding.symbol
                );
                Self::resolve_fallback(holding, None)
            }
            Err(e) => {
                warn!(
                    "Price lookup failed for {}: {}; using baseline price",
                    holding.symbol, e
                );
                Self::resolve_fallback(holding, None)
            }
        }
    }

    async fn resolve_one_historical(
        &self,
        holding: &Holding,
        period: HistoryPeriod,
    ) -> ResolvedHolding {
        if holding.is_cash() {
            return Self::resolve_cash(holding, Some(period));
        }

        match self.client.get_history(&holding.symbol, period).await {
            Ok(series) if series.closes.len() >= 2 => {
                Self::resolved_from_history(holding, &series, period)
            }
            Ok(_) => {
                warn!(
                    "Not enough {} history for {}; using baseline price",
                    period.as_str(),
                    holding.symbol
                );
                Self::resolve_fallback(holding, Some(period))
            }
            Err(e) => {
                warn!(
                    "History lookup failed for {}: {}; using baseline price",
                    holding.symbol, e
                );
                Self::resolve_fallback(holding, Some(period))
            }
        }
    }

    /// Change over the window, relative to the previous session for the
    /// one-day period and to the earliest session otherwise.
    fn resolved_from_history(
        holding: &Holding,
        series: &PriceSeries,
        period: HistoryPeriod,
    ) -> ResolvedHolding {
        let current_price = series.latest_close().unwrap_or(holding.baseline_price);
        let reference_close = match period {
            HistoryPeriod::Day => series.previous_close().or_else(|| series.latest_open()),
            _ => series.earliest_close(),
        };

        let change_pct = reference_close
            .and_then(|reference| {
                (current_price - reference)
                    .checked_div(reference)
                    .map(|ratio| (ratio * Decimal::ONE_HUNDRED).round_dp(PERCENT_PRECISION))
            })
            .unwrap_or(Decimal::ZERO);

        ResolvedHolding {
            current_price,
            previous_close: reference_close,
            price_source: PriceSource::Live,
            historical_change_pct: Some(change_pct),
            period: Some(period),
            ..ResolvedHolding::from_holding(holding)
        }
    }

    /// Symbols that had to fall back this cycle, in input order.
    fn collect_failed(resolved: &[ResolvedHolding]) -> Vec<String> {
        resolved
            .iter()
            .filter(|r| r.price_source == PriceSource::Default)
            .map(|r| r.symbol.clone())
            .collect()
    }
}

#[async_trait]
impl PriceResolutionServiceTrait for PriceResolutionService {
    async fn resolve(&self, holdings: &[Holding]) -> Resolution {
        debug!("Resolving prices for {} holdings", holdings.len());

        // Lookups are independent and failure-isolated, so they run
        // concurrently; join_all keeps the configuration order.
        let resolved: Vec<ResolvedHolding> =
            join_all(holdings.iter().map(|h| self.resolve_one(h))).await;
        let failed_symbols = Self::collect_failed(&resolved);

        if !failed_symbols.is_empty() {
            warn!(
                "{}/{} symbols fell back to baseline prices",
                failed_symbols.len(),
                holdings.len()
            );
        }

        Resolution {
            holdings: resolved,
            failed_symbols,
        }
    }

    async fn resolve_historical(&self, holdings: &[Holding], period: HistoryPeriod) -> Resolution {
        debug!(
            "Resolving {} history for {} holdings",
            period.as_str(),
            holdings.len()
        );

        let resolved: Vec<ResolvedHolding> = join_all(
            holdings
                .iter()
                .map(|h| self.resolve_one_historical(h, period)),
        )
        .await;
        let failed_symbols = Self::collect_failed(&resolved);

        Resolution {
            holdings: resolved,
            failed_symbols,
        }
    }
}
