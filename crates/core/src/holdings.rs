//! Static holding configuration for the shared pool.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One configured position in the shared portfolio.
///
/// Holdings are loaded once at startup and never change while the process
/// runs. `baseline_price` is the static fallback used whenever a live
/// lookup fails, and for the cash position it is the fixed price itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Symbol in the market data provider's notation (unique key)
    pub symbol: String,

    /// Number of units held by the pool (non-negative)
    pub quantity: Decimal,

    /// Static fallback price
    pub baseline_price: Decimal,

    /// Display name
    pub name: String,

    /// Industry classification; `None` denotes the cash position
    pub industry: Option<String>,
}

impl Holding {
    /// Cash-like holdings carry no industry and are valued at their
    /// baseline price without ever hitting the market data provider.
    pub fn is_cash(&self) -> bool {
        self.industry.is_none()
    }
}
