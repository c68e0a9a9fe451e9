use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::portfolio::valuation::*;
use crate::pricing::{PriceSource, ResolvedHolding};
use crate::users::User;

fn resolved(
    symbol: &str,
    quantity: Decimal,
    baseline: Decimal,
    current: Decimal,
    previous: Option<Decimal>,
    source: PriceSource,
) -> ResolvedHolding {
    ResolvedHolding {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        industry: if symbol == "CASH" {
            None
        } else {
            Some("Software".to_string())
        },
        quantity,
        baseline_price: baseline,
        current_price: current,
        previous_close: previous,
        price_source: source,
        historical_change_pct: None,
        period: None,
    }
}

fn user(pct: Decimal, initial: Decimal) -> User {
    User {
        username: "owner".to_string(),
        password: String::new(),
        portfolio_percentage: pct,
        initial_investment: initial,
    }
}

#[test]
fn test_total_value_sums_quantity_times_price() {
    let holdings = vec![
        resolved(
            "AAPL",
            dec!(10),
            dec!(100),
            dec!(110),
            Some(dec!(105)),
            PriceSource::Live,
        ),
        resolved(
            "CASH",
            dec!(500),
            dec!(1),
            dec!(1),
            Some(dec!(1)),
            PriceSource::Fixed,
        ),
    ];
    assert_eq!(total_value(&holdings), dec!(1600));
}

#[test]
fn test_price_delta_moves_total_by_quantity_times_delta() {
    let mut holdings = vec![resolved(
        "AAPL",
        dec!(10),
        dec!(100),
        dec!(110),
        None,
        PriceSource::Live,
    )];
    let before = total_value(&holdings);
    holdings[0].current_price += dec!(3);
    assert_eq!(total_value(&holdings) - before, dec!(30));
}

#[test]
fn test_user_values_split_total_exactly() {
    let holdings = vec![resolved(
        "AAPL",
        dec!(10),
        dec!(100),
        dec!(100),
        None,
        PriceSource::Live,
    )];
    let alice = user(dec!(0.6), dec!(500));
    let bob = user(dec!(0.4), dec!(300));

    let alice_value = user_value(&holdings, &alice);
    let bob_value = user_value(&holdings, &bob);
    assert_eq!(alice_value, dec!(600));
    assert_eq!(bob_value, dec!(400));
    assert_eq!(alice_value + bob_value, total_value(&holdings));
}

#[test]
fn test_total_return_and_pct() {
    let owner = user(dec!(1), dec!(1000));
    assert_eq!(total_return(&owner, dec!(1250)), dec!(250));
    assert_eq!(total_return_pct(&owner, dec!(1250)), dec!(25));
}

#[test]
fn test_total_return_pct_guards_zero_initial_investment() {
    let owner = user(dec!(1), Decimal::ZERO);
    assert_eq!(total_return_pct(&owner, dec!(1250)), Decimal::ZERO);

    let negative = user(dec!(1), dec!(-10));
    assert_eq!(total_return_pct(&negative, dec!(1250)), Decimal::ZERO);
}

#[test]
fn test_daily_change_value_for_half_share() {
    // (110 - 105) × 10 × 0.5 = 25
    let holding = resolved(
        "AAPL",
        dec!(10),
        dec!(100),
        dec!(110),
        Some(dec!(105)),
        PriceSource::Live,
    );
    assert_eq!(holding_daily_change_value(&holding, dec!(0.5)), dec!(25));
}

#[test]
fn test_missing_previous_close_contributes_nothing() {
    let holding = resolved(
        "AAPL",
        dec!(10),
        dec!(100),
        dec!(110),
        None,
        PriceSource::Live,
    );
    assert_eq!(holding_daily_change_value(&holding, dec!(1)), Decimal::ZERO);
    assert_eq!(holding_daily_change_pct(&holding), Decimal::ZERO);
}

#[test]
fn test_user_daily_change_sums_positions() {
    let holdings = vec![
        resolved(
            "AAPL",
            dec!(10),
            dec!(100),
            dec!(110),
            Some(dec!(105)),
            PriceSource::Live,
        ),
        resolved(
            "MSFT",
            dec!(4),
            dec!(200),
            dec!(198),
            Some(dec!(200)),
            PriceSource::Live,
        ),
        resolved("NODATA", dec!(7), dec!(50), dec!(50), None, PriceSource::Live),
    ];
    let owner = user(dec!(0.5), dec!(1000));
    // (5 × 10 + (−2) × 4) × 0.5 = 21
    assert_eq!(user_daily_change(&holdings, &owner), dec!(21));
}

#[test]
fn test_daily_change_pct_guards_zero_user_value() {
    assert_eq!(daily_change_pct(dec!(25), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(daily_change_pct(dec!(25), dec!(500)), dec!(5));
}

#[test]
fn test_price_change_pct_is_zero_for_default_source() {
    let holding = resolved(
        "AAPL",
        dec!(10),
        dec!(100),
        dec!(100),
        Some(dec!(100)),
        PriceSource::Default,
    );
    assert_eq!(price_change_pct(&holding), Decimal::ZERO);
}

#[test]
fn test_price_change_pct_against_baseline() {
    let holding = resolved(
        "AAPL",
        dec!(10),
        dec!(100),
        dec!(110),
        Some(dec!(105)),
        PriceSource::Live,
    );
    assert_eq!(price_change_pct(&holding), dec!(10));
}

#[test]
fn test_price_change_pct_guards_zero_baseline() {
    let holding = resolved(
        "FREE",
        dec!(10),
        Decimal::ZERO,
        dec!(5),
        None,
        PriceSource::Live,
    );
    assert_eq!(price_change_pct(&holding), Decimal::ZERO);
}

#[test]
fn test_snapshot_combines_all_figures() {
    let holdings = vec![
        resolved(
            "AAPL",
            dec!(10),
            dec!(100),
            dec!(110),
            Some(dec!(105)),
            PriceSource::Live,
        ),
        resolved(
            "CASH",
            dec!(900),
            dec!(1),
            dec!(1),
            Some(dec!(1)),
            PriceSource::Fixed,
        ),
    ];
    let owner = user(dec!(0.5), dec!(800));

    let snapshot = PortfolioSnapshot::compute(&holdings, &owner);
    assert_eq!(snapshot.total_value, dec!(2000));
    assert_eq!(snapshot.user_value, dec!(1000));
    assert_eq!(snapshot.total_return, dec!(200));
    assert_eq!(snapshot.total_return_pct, dec!(25));
    assert_eq!(snapshot.daily_change, dec!(25));
    assert_eq!(snapshot.daily_change_pct, dec!(2.5));
}
