//! Sharefolio Market Data Crate
//!
//! Provider-agnostic market data fetching for the sharefolio portfolio
//! engine.
//!
//! # Overview
//!
//! The crate exposes a small surface:
//!
//! - [`MarketDataProvider`] - trait implemented by concrete data sources
//! - [`Quote`] - a single trading session with OHLCV data
//! - [`MarketDataError`] - the error taxonomy for all provider operations
//! - [`YahooProvider`] - the shipped Yahoo Finance implementation
//!
//! Consumers talk to a provider through the trait only, so a mock provider
//! can be substituted in tests without touching the domain layer.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
