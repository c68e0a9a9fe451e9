//! Portfolio valuation: pure transforms over resolved holdings.
//!
//! Every function here is a pure function of its arguments; no state
//! survives a refresh cycle. All division is guarded: a zero or otherwise
//! degenerate denominator yields exactly `Decimal::ZERO`, so no figure
//! leaving this module can be non-finite.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::PERCENT_PRECISION;
use crate::pricing::{PriceSource, ResolvedHolding};
use crate::users::User;

/// Value of the whole pool: Σ quantity × current price, cash included.
pub fn total_value(holdings: &[ResolvedHolding]) -> Decimal {
    holdings.iter().map(stock_value).sum()
}

/// The slice of the pool a user owns.
pub fn user_value(holdings: &[ResolvedHolding], user: &User) -> Decimal {
    total_value(holdings) * user.portfolio_percentage
}

/// Lifetime return against the user's configured initial investment.
pub fn total_return(user: &User, user_value: Decimal) -> Decimal {
    user_value - user.initial_investment
}

/// Lifetime return as a percentage of the initial investment.
///
/// A zero or negative initial investment has no meaningful return rate and
/// yields zero.
pub fn total_return_pct(user: &User, user_value: Decimal) -> Decimal {
    if user.initial_investment <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    percent(total_return(user, user_value), user.initial_investment)
}

/// Value of one position: quantity × current price.
pub fn stock_value(holding: &ResolvedHolding) -> Decimal {
    holding.quantity * holding.current_price
}

/// Change of the current price against the configured baseline, percent.
///
/// When the price fell back to the baseline there is no real change to
/// report, so the figure is exactly zero.
pub fn price_change_pct(holding: &ResolvedHolding) -> Decimal {
    if holding.price_source == PriceSource::Default {
        return Decimal::ZERO;
    }
    percent(
        holding.current_price - holding.baseline_price,
        holding.baseline_price,
    )
}

/// Day-over-day move of one position's price, percent.
pub fn holding_daily_change_pct(holding: &ResolvedHolding) -> Decimal {
    match holding.previous_close {
        Some(previous) => percent(holding.current_price - previous, previous),
        None => Decimal::ZERO,
    }
}

/// Money moved today in the user's share of one position.
///
/// A holding without a previous close contributes nothing.
pub fn holding_daily_change_value(holding: &ResolvedHolding, user_pct: Decimal) -> Decimal {
    match holding.previous_close {
        Some(previous) => (holding.current_price - previous) * holding.quantity * user_pct,
        None => Decimal::ZERO,
    }
}

/// Money moved today across the user's whole share of the pool.
pub fn user_daily_change(holdings: &[ResolvedHolding], user: &User) -> Decimal {
    holdings
        .iter()
        .map(|h| holding_daily_change_value(h, user.portfolio_percentage))
        .sum()
}

/// Today's move as a percentage of the user's current value.
pub fn daily_change_pct(daily_change: Decimal, user_value: Decimal) -> Decimal {
    percent(daily_change, user_value)
}

/// Guarded percentage: `numerator / denominator × 100`, zero denominator
/// yields zero.
fn percent(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator
        .checked_div(denominator)
        .map(|ratio| (ratio * Decimal::ONE_HUNDRED).round_dp(PERCENT_PRECISION))
        .unwrap_or(Decimal::ZERO)
}

/// Ephemeral valuation of the pool for one user, recomputed every refresh.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub total_value: Decimal,
    pub user_value: Decimal,
    pub total_return: Decimal,
    pub total_return_pct: Decimal,
    pub daily_change: Decimal,
    pub daily_change_pct: Decimal,
}

impl PortfolioSnapshot {
    /// Compute the full set of dashboard figures for one user.
    pub fn compute(holdings: &[ResolvedHolding], user: &User) -> Self {
        let total = total_value(holdings);
        let user_val = total * user.portfolio_percentage;
        let daily = user_daily_change(holdings, user);
        Self {
            total_value: total,
            user_value: user_val,
            total_return: total_return(user, user_val),
            total_return_pct: total_return_pct(user, user_val),
            daily_change: daily,
            daily_change_pct: daily_change_pct(daily, user_val),
        }
    }
}
