//! Sharefolio Core - Domain entities and services for a shared portfolio.
//!
//! One pool of holdings is owned jointly by several users, each with a fixed
//! percentage share. This crate resolves live prices for the pool (with a
//! static fallback when market data is unavailable), values the pool per
//! user, and produces the login notifications the dashboard shows.
//!
//! The market data transport itself lives in the sibling
//! `sharefolio-market-data` crate; this crate talks to it through the
//! [`pricing::MarketDataClientTrait`] facade so everything here is testable
//! with mocks.

pub mod config;
pub mod constants;
pub mod errors;
pub mod holdings;
pub mod messages;
pub mod portfolio;
pub mod pricing;
pub mod translations;
pub mod users;
pub mod utils;

// Re-export the types most consumers need
pub use holdings::Holding;
pub use pricing::{HistoryPeriod, PriceSource, Resolution, ResolvedHolding};
pub use users::User;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
