//! Domain models for price resolution.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::Holding;

/// Where a resolved price came from.
///
/// The provenance is an explicit tag rather than an optional-field
/// convention: every `ResolvedHolding` always carries a usable
/// `current_price`, and this enum says how it was obtained.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PriceSource {
    /// Fetched from the market data provider this cycle
    Live,
    /// Live lookup failed or returned nothing; baseline price substituted
    Default,
    /// Fixed-value asset (cash); never looked up
    Fixed,
}

/// Lookback window for historical change queries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryPeriod {
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1w")]
    Week,
    #[serde(rename = "1m")]
    Month,
    #[serde(rename = "1y")]
    Year,
}

impl HistoryPeriod {
    /// Calendar days to look back when querying the provider.
    ///
    /// The one-day window spans five calendar days so that two trading
    /// sessions are available even across a weekend or a single holiday.
    pub fn lookback_days(&self) -> i64 {
        match self {
            HistoryPeriod::Day => 5,
            HistoryPeriod::Week => 7,
            HistoryPeriod::Month => 30,
            HistoryPeriod::Year => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryPeriod::Day => "1d",
            HistoryPeriod::Week => "1w",
            HistoryPeriod::Month => "1m",
            HistoryPeriod::Year => "1y",
        }
    }
}

/// Price series for one symbol, oldest session first.
///
/// `opens` is aligned with `closes`; an entry is `None` when the provider
/// did not report an open for that session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub closes: Vec<Decimal>,
    pub opens: Vec<Option<Decimal>>,
}

impl PriceSeries {
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Close of the most recent session.
    pub fn latest_close(&self) -> Option<Decimal> {
        self.closes.last().copied()
    }

    /// Close of the session before the most recent one.
    pub fn previous_close(&self) -> Option<Decimal> {
        if self.closes.len() >= 2 {
            Some(self.closes[self.closes.len() - 2])
        } else {
            None
        }
    }

    /// Open of the most recent session, if the provider reported one.
    pub fn latest_open(&self) -> Option<Decimal> {
        self.opens.last().copied().flatten()
    }

    /// Close of the oldest session in the window.
    pub fn earliest_close(&self) -> Option<Decimal> {
        self.closes.first().copied()
    }
}

/// One holding with its price resolved for the current refresh cycle.
///
/// Created fresh every cycle and never mutated; the next refresh replaces
/// the whole set. `current_price` is always populated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedHolding {
    pub symbol: String,
    pub name: String,
    pub industry: Option<String>,
    pub quantity: Decimal,
    pub baseline_price: Decimal,

    /// Latest close on a live lookup, baseline price otherwise
    pub current_price: Decimal,

    /// Previous session close; `None` when the live data had no usable
    /// previous session
    pub previous_close: Option<Decimal>,

    pub price_source: PriceSource,

    /// Change over the requested window, percent; only set by historical
    /// resolution
    pub historical_change_pct: Option<Decimal>,

    /// The window `historical_change_pct` refers to
    pub period: Option<HistoryPeriod>,
}

impl ResolvedHolding {
    /// Whether this cycle's price actually came from the provider.
    pub fn is_live(&self) -> bool {
        self.price_source == PriceSource::Live
    }

    pub(crate) fn from_holding(holding: &Holding) -> Self {
        Self {
            symbol: holding.symbol.clone(),
            name: holding.name.clone(),
            industry: holding.industry.clone(),
            quantity: holding.quantity,
            baseline_price: holding.baseline_price,
            current_price: holding.baseline_price,
            previous_close: None,
            price_source: PriceSource::Default,
            historical_change_pct: None,
            period: None,
        }
    }
}

/// Result of one resolution cycle over the whole pool.
///
/// `holdings` preserves the configuration order; `failed_symbols` lists the
/// symbols that fell back to their baseline price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub holdings: Vec<ResolvedHolding>,
    pub failed_symbols: Vec<String>,
}
