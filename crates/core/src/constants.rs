use std::time::Duration;

/// How long a resolved price set stays fresh before the next refresh
/// triggers new market data lookups.
pub const RESOLUTION_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Decimal places kept on derived percentage figures.
pub const PERCENT_PRECISION: u32 = 4;

/// Symbol of the cash position in the shared pool.
pub const CASH_SYMBOL: &str = "CASH";
