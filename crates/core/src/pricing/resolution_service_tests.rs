use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use sharefolio_market_data::MarketDataError;

use crate::holdings::Holding;
use crate::pricing::client::MarketDataClientTrait;
use crate::pricing::model::{HistoryPeriod, PriceSeries, PriceSource};
use crate::pricing::resolution_service::{PriceResolutionService, PriceResolutionServiceTrait};

// --- Mock market data client ---

#[derive(Clone)]
enum Outcome {
    Series(PriceSeries),
    Fail,
}

#[derive(Default)]
struct MockMarketDataClient {
    recent: Mutex<HashMap<String, Outcome>>,
    history: Mutex<HashMap<String, Outcome>>,
    calls: Mutex<Vec<String>>,
}

impl MockMarketDataClient {
    fn set_recent(&self, symbol: &str, outcome: Outcome) {
        self.recent
            .lock()
            .unwrap()
            .insert(symbol.to_string(), outcome);
    }

    fn set_history(&self, symbol: &str, outcome: Outcome) {
        self.history
            .lock()
            .unwrap()
            .insert(symbol.to_string(), outcome);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn outcome_for(
        map: &Mutex<HashMap<String, Outcome>>,
        symbol: &str,
    ) -> Result<PriceSeries, MarketDataError> {
        match map.lock().unwrap().get(symbol) {
            Some(Outcome::Series(series)) => Ok(series.clone()),
            Some(Outcome::Fail) => Err(MarketDataError::ProviderError {
                provider: "MOCK".to_string(),
                message: "intentional failure".to_string(),
            }),
            None => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
        }
    }
}

#[async_trait]
impl MarketDataClientTrait for MockMarketDataClient {
    async fn get_recent(&self, symbol: &str) -> Result<PriceSeries, MarketDataError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        Self::outcome_for(&self.recent, symbol)
    }

    async fn get_history(
        &self,
        symbol: &str,
        _period: HistoryPeriod,
    ) -> Result<PriceSeries, MarketDataError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        Self::outcome_for(&self.history, symbol)
    }
}

// --- Helpers ---

fn stock(symbol: &str, quantity: Decimal, baseline: Decimal) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        quantity,
        baseline_price: baseline,
        name: symbol.to_string(),
        industry: Some("Software".to_string()),
    }
}

fn cash(quantity: Decimal) -> Holding {
    Holding {
        symbol: "CASH".to_string(),
        quantity,
        baseline_price: dec!(1.00),
        name: "Cash".to_string(),
        industry: None,
    }
}

fn series(closes: &[Decimal]) -> PriceSeries {
    PriceSeries {
        closes: closes.to_vec(),
        opens: vec![None; closes.len()],
    }
}

fn service(client: &Arc<MockMarketDataClient>) -> PriceResolutionService {
    PriceResolutionService::new(client.clone() as Arc<dyn MarketDataClientTrait>)
}

// --- Current-price resolution ---

#[tokio::test]
async fn test_live_lookup_with_two_sessions() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_recent("AAPL", Outcome::Series(series(&[dec!(105), dec!(110)])));

    let resolution = service(&client)
        .resolve(&[stock("AAPL", dec!(10), dec!(100))])
        .await;

    let resolved = &resolution.holdings[0];
    assert_eq!(resolved.current_price, dec!(110));
    assert_eq!(resolved.previous_close, Some(dec!(105)));
    assert_eq!(resolved.price_source, PriceSource::Live);
    assert!(resolution.failed_symbols.is_empty());
}

#[tokio::test]
async fn test_single_session_uses_open_as_previous_close() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_recent(
        "AAPL",
        Outcome::Series(PriceSeries {
            closes: vec![dec!(110)],
            opens: vec![Some(dec!(108))],
        }),
    );

    let resolution = service(&client)
        .resolve(&[stock("AAPL", dec!(10), dec!(100))])
        .await;

    let resolved = &resolution.holdings[0];
    assert_eq!(resolved.current_price, dec!(110));
    assert_eq!(resolved.previous_close, Some(dec!(108)));
    assert_eq!(resolved.price_source, PriceSource::Live);
}

#[tokio::test]
async fn test_single_session_without_open_has_no_previous_close() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_recent("AAPL", Outcome::Series(series(&[dec!(110)])));

    let resolution = service(&client)
        .resolve(&[stock("AAPL", dec!(10), dec!(100))])
        .await;

    assert_eq!(resolution.holdings[0].previous_close, None);
    assert_eq!(resolution.holdings[0].price_source, PriceSource::Live);
}

#[tokio::test]
async fn test_lookup_failure_falls_back_to_baseline() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_recent("AAPL", Outcome::Fail);

    let resolution = service(&client)
        .resolve(&[stock("AAPL", dec!(10), dec!(100))])
        .await;

    let resolved = &resolution.holdings[0];
    assert_eq!(resolved.current_price, dec!(100));
    assert_eq!(resolved.previous_close, Some(dec!(100)));
    assert_eq!(resolved.price_source, PriceSource::Default);
    assert_eq!(resolution.failed_symbols, vec!["AAPL".to_string()]);
}

#[tokio::test]
async fn test_empty_series_counts_as_failure() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_recent("AAPL", Outcome::Series(PriceSeries::default()));

    let resolution = service(&client)
        .resolve(&[stock("AAPL", dec!(10), dec!(100))])
        .await;

    assert_eq!(resolution.holdings[0].price_source, PriceSource::Default);
    assert_eq!(resolution.failed_symbols, vec!["AAPL".to_string()]);
}

#[tokio::test]
async fn test_unknown_symbol_counts_as_failure() {
    let client = Arc::new(MockMarketDataClient::default());

    let resolution = service(&client)
        .resolve(&[stock("NOPE", dec!(1), dec!(50))])
        .await;

    assert_eq!(resolution.holdings[0].current_price, dec!(50));
    assert_eq!(resolution.failed_symbols, vec!["NOPE".to_string()]);
}

#[tokio::test]
async fn test_cash_bypasses_lookup() {
    let client = Arc::new(MockMarketDataClient::default());

    let resolution = service(&client).resolve(&[cash(dec!(81358))]).await;

    let resolved = &resolution.holdings[0];
    assert_eq!(resolved.current_price, dec!(1.00));
    assert_eq!(resolved.previous_close, Some(dec!(1.00)));
    assert_eq!(resolved.price_source, PriceSource::Fixed);
    assert!(resolution.failed_symbols.is_empty());
    assert!(client.calls().is_empty(), "cash must never hit the client");
}

#[tokio::test]
async fn test_failure_on_one_symbol_does_not_affect_others() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_recent("GOOD", Outcome::Series(series(&[dec!(20), dec!(21)])));
    client.set_recent("BAD", Outcome::Fail);

    let holdings = [
        stock("GOOD", dec!(5), dec!(19)),
        stock("BAD", dec!(3), dec!(40)),
        cash(dec!(100)),
    ];
    let resolution = service(&client).resolve(&holdings).await;

    // Input order is preserved
    assert_eq!(resolution.holdings[0].symbol, "GOOD");
    assert_eq!(resolution.holdings[1].symbol, "BAD");
    assert_eq!(resolution.holdings[2].symbol, "CASH");

    assert_eq!(resolution.holdings[0].price_source, PriceSource::Live);
    assert_eq!(resolution.holdings[0].current_price, dec!(21));
    assert_eq!(resolution.holdings[1].price_source, PriceSource::Default);
    assert_eq!(resolution.holdings[1].current_price, dec!(40));
    assert_eq!(resolution.failed_symbols, vec!["BAD".to_string()]);
}

#[tokio::test]
async fn test_zero_close_is_still_a_defined_price() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_recent("ZERO", Outcome::Series(series(&[dec!(0)])));

    let resolution = service(&client)
        .resolve(&[stock("ZERO", dec!(10), dec!(100))])
        .await;

    assert_eq!(resolution.holdings[0].current_price, dec!(0));
    assert_eq!(resolution.holdings[0].price_source, PriceSource::Live);
}

// --- Historical resolution ---

#[tokio::test]
async fn test_year_change_uses_earliest_close() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_history(
        "AAPL",
        Outcome::Series(series(&[dec!(50), dec!(60), dec!(75)])),
    );

    let resolution = service(&client)
        .resolve_historical(&[stock("AAPL", dec!(10), dec!(100))], HistoryPeriod::Year)
        .await;

    let resolved = &resolution.holdings[0];
    assert_eq!(resolved.historical_change_pct, Some(dec!(50.0)));
    assert_eq!(resolved.current_price, dec!(75));
    assert_eq!(resolved.period, Some(HistoryPeriod::Year));
    assert_eq!(resolved.price_source, PriceSource::Live);
}

#[tokio::test]
async fn test_day_change_uses_previous_session_close() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_history(
        "AAPL",
        Outcome::Series(series(&[dec!(100), dec!(105), dec!(110)])),
    );

    let resolution = service(&client)
        .resolve_historical(&[stock("AAPL", dec!(10), dec!(100))], HistoryPeriod::Day)
        .await;

    let resolved = &resolution.holdings[0];
    // (110 - 105) / 105 * 100, rounded to 4 decimal places
    assert_eq!(resolved.historical_change_pct, Some(dec!(4.7619)));
    assert_eq!(resolved.previous_close, Some(dec!(105)));
}

#[tokio::test]
async fn test_zero_reference_close_yields_zero_change() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_history("PENNY", Outcome::Series(series(&[dec!(0), dec!(5)])));

    let resolution = service(&client)
        .resolve_historical(&[stock("PENNY", dec!(1), dec!(1))], HistoryPeriod::Year)
        .await;

    assert_eq!(
        resolution.holdings[0].historical_change_pct,
        Some(Decimal::ZERO)
    );
}

#[tokio::test]
async fn test_historical_fallback_has_zero_change() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_history("AAPL", Outcome::Fail);

    let resolution = service(&client)
        .resolve_historical(&[stock("AAPL", dec!(10), dec!(100))], HistoryPeriod::Month)
        .await;

    let resolved = &resolution.holdings[0];
    assert_eq!(resolved.current_price, dec!(100));
    assert_eq!(resolved.historical_change_pct, Some(Decimal::ZERO));
    assert_eq!(resolved.price_source, PriceSource::Default);
    assert_eq!(resolution.failed_symbols, vec!["AAPL".to_string()]);
}

#[tokio::test]
async fn test_historical_single_session_counts_as_failure() {
    let client = Arc::new(MockMarketDataClient::default());
    client.set_history("AAPL", Outcome::Series(series(&[dec!(110)])));

    let resolution = service(&client)
        .resolve_historical(&[stock("AAPL", dec!(10), dec!(100))], HistoryPeriod::Week)
        .await;

    assert_eq!(resolution.holdings[0].price_source, PriceSource::Default);
    assert_eq!(resolution.failed_symbols, vec!["AAPL".to_string()]);
}

#[tokio::test]
async fn test_historical_cash_is_fixed_with_zero_change() {
    let client = Arc::new(MockMarketDataClient::default());

    let resolution = service(&client)
        .resolve_historical(&[cash(dec!(100))], HistoryPeriod::Year)
        .await;

    let resolved = &resolution.holdings[0];
    assert_eq!(resolved.price_source, PriceSource::Fixed);
    assert_eq!(resolved.historical_change_pct, Some(Decimal::ZERO));
    assert!(resolution.failed_symbols.is_empty());
    assert!(client.calls().is_empty());
}
