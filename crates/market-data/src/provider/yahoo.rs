//! Yahoo Finance market data provider.
//!
//! Fetches equity, ETF and index fund quotes through the Yahoo Finance API.
//! Symbols use Yahoo's notation, including exchange suffixes (e.g. `HEI.DE`,
//! `3BAL.L`).

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::warn;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    /// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
    fn chrono_to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(dt.timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    /// Map a Yahoo API error to our error taxonomy.
    fn map_error(symbol: &str, e: yahoo::YahooError) -> MarketDataError {
        if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            MarketDataError::SymbolNotFound(symbol.to_string())
        } else {
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            }
        }
    }

    /// Convert a Yahoo quote to our Quote model.
    fn yahoo_quote_to_quote(yahoo_quote: yahoo::Quote) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        // Close price is required
        let close = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
            MarketDataError::ValidationFailed {
                message: format!(
                    "Failed to convert close price {} to Decimal",
                    yahoo_quote.close
                ),
            }
        })?;

        Ok(Quote {
            timestamp,
            open: Decimal::from_f64_retain(yahoo_quote.open),
            high: Decimal::from_f64_retain(yahoo_quote.high),
            low: Decimal::from_f64_retain(yahoo_quote.low),
            close,
            volume: Decimal::from_u64(yahoo_quote.volume),
            source: PROVIDER_ID.to_string(),
        })
    }

    /// Convert a Yahoo response into ascending quotes, dropping sessions
    /// with unusable data instead of failing the whole request.
    fn collect_quotes(symbol: &str, response: yahoo::YResponse) -> Vec<Quote> {
        let yahoo_quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!("No quotes returned for {}: {}", symbol, e);
                return Vec::new();
            }
        };

        let mut quotes: Vec<Quote> = yahoo_quotes
            .into_iter()
            .filter_map(|q| match Self::yahoo_quote_to_quote(q) {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!("Dropping unusable quote for {}: {}", symbol, e);
                    None
                }
            })
            .collect();
        quotes.sort_by_key(|q| q.timestamp);
        quotes
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_recent_quotes(&self, symbol: &str) -> Result<Vec<Quote>, MarketDataError> {
        // A 5-day range still yields two sessions across weekends and
        // single-day holidays; the result is trimmed to the last two.
        let response = self
            .connector
            .get_quote_range(symbol, "1d", "5d")
            .await
            .map_err(|e| Self::map_error(symbol, e))?;

        let mut quotes = Self::collect_quotes(symbol, response);
        if quotes.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }
        let keep = quotes.len().saturating_sub(2);
        quotes.drain(..keep);
        Ok(quotes)
    }

    async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let response = self
            .connector
            .get_quote_history(
                symbol,
                Self::chrono_to_offset_datetime(start),
                Self::chrono_to_offset_datetime(end),
            )
            .await
            .map_err(|e| Self::map_error(symbol, e))?;

        let quotes = Self::collect_quotes(symbol, response);
        if quotes.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }
        Ok(quotes)
    }
}
