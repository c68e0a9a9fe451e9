//! Allocation breakdowns for the dashboard charts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::ResolvedHolding;
use crate::users::User;

use super::valuation::stock_value;

/// Label used for the cash bucket in industry breakdowns.
const CASH_INDUSTRY: &str = "Cash";

/// A user's share of one position.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymbolAllocation {
    pub symbol: String,
    pub name: String,
    pub industry: Option<String>,
    pub value: Decimal,
}

/// A user's share of one industry bucket.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndustryAllocation {
    pub industry: String,
    pub value: Decimal,
}

/// Per-symbol values of the user's share, zero positions skipped.
pub fn symbol_allocations(holdings: &[ResolvedHolding], user: &User) -> Vec<SymbolAllocation> {
    holdings
        .iter()
        .filter_map(|holding| {
            let value = stock_value(holding) * user.portfolio_percentage;
            if value <= Decimal::ZERO {
                return None;
            }
            Some(SymbolAllocation {
                symbol: holding.symbol.clone(),
                name: holding.name.clone(),
                industry: holding.industry.clone(),
                value,
            })
        })
        .collect()
}

/// Per-industry values of the user's share, in first-seen order.
///
/// The cash position carries no industry and lands in its own bucket.
pub fn industry_allocations(holdings: &[ResolvedHolding], user: &User) -> Vec<IndustryAllocation> {
    let mut buckets: Vec<IndustryAllocation> = Vec::new();
    for holding in holdings {
        let value = stock_value(holding) * user.portfolio_percentage;
        if value <= Decimal::ZERO {
            continue;
        }
        let industry = holding.industry.as_deref().unwrap_or(CASH_INDUSTRY);
        match buckets.iter_mut().find(|b| b.industry == industry) {
            Some(bucket) => bucket.value += value,
            None => buckets.push(IndustryAllocation {
                industry: industry.to_string(),
                value,
            }),
        }
    }
    buckets
}

/// How many non-cash positions carry a live price this cycle.
///
/// Returns `(live, total_non_cash)` for the "live price coverage" figure.
pub fn live_price_coverage(holdings: &[ResolvedHolding]) -> (usize, usize) {
    let non_cash: Vec<_> = holdings.iter().filter(|h| h.industry.is_some()).collect();
    let live = non_cash.iter().filter(|h| h.is_live()).count();
    (live, non_cash.len())
}
