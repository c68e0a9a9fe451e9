//! Users of the shared pool and credential checks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One owner of the shared pool.
///
/// Every user sees the same holdings; `portfolio_percentage` is their fixed
/// fractional share of the whole pool. The percentages across users are
/// configuration data and are not required to sum to one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,

    /// Opaque credential, compared verbatim at login
    pub password: String,

    /// Fraction of the total pool owned, in [0, 1]
    pub portfolio_percentage: Decimal,

    /// Reference amount for the lifetime-return figure
    pub initial_investment: Decimal,
}

/// Look up a user by exact username/password match.
///
/// Returns `None` for unknown users or wrong passwords; callers render the
/// same error message for both cases.
pub fn authenticate<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.username == username && u.password == password)
}
