//! Portfolio valuation and breakdowns over resolved holdings.

pub mod allocation;
pub mod valuation;

#[cfg(test)]
mod valuation_tests;

pub use allocation::{
    industry_allocations, live_price_coverage, symbol_allocations, IndustryAllocation,
    SymbolAllocation,
};
pub use valuation::PortfolioSnapshot;
