//! Process-wide portfolio configuration.
//!
//! The user list and the holding list are fixed for the lifetime of the
//! process: loaded once at startup, immutable afterwards. A JSON file can
//! override the embedded defaults so the portfolio can be edited without
//! rebuilding.

use std::fs;
use std::path::Path;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::CASH_SYMBOL;
use crate::errors::{Error, Result};
use crate::holdings::Holding;
use crate::users::User;

/// The full static configuration: who owns the pool and what is in it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioConfig {
    pub users: Vec<User>,
    pub holdings: Vec<Holding>,
}

impl PortfolioConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::ConfigIO(format!("{}: {}", path.display(), e)))?;
        let config: PortfolioConfig = serde_json::from_str(&raw)
            .map_err(|e| Error::InvalidConfigValue(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write configuration to a JSON file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).map_err(|e| Error::ConfigIO(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Reject configurations the engines cannot work with.
    fn validate(&self) -> Result<()> {
        for holding in &self.holdings {
            if holding.quantity.is_sign_negative() {
                return Err(Error::InvalidConfigValue(format!(
                    "Holding {} has negative quantity",
                    holding.symbol
                )));
            }
        }
        let mut seen = std::collections::HashSet::new();
        for holding in &self.holdings {
            if !seen.insert(holding.symbol.as_str()) {
                return Err(Error::InvalidConfigValue(format!(
                    "Duplicate holding symbol {}",
                    holding.symbol
                )));
            }
        }
        Ok(())
    }
}

impl Default for PortfolioConfig {
    /// The shipped shared portfolio.
    ///
    /// Per-user `initial_investment` figures are configuration data, not a
    /// computed invariant: the first user's figure is the stated total of
    /// the others and the percentages do not sum exactly to one.
    fn default() -> Self {
        let users = vec![
            user("user", "password", dec!(1.0), dec!(231158)),
            user("foehr", "foehr1", dec!(0.05954698), dec!(20200)),
            user("kremer", "kremer1", dec!(0.60447851), dec!(130000)),
            user("annika", "anakin", dec!(0.003068), dec!(720)),
            user("juergen", "juergen1", dec!(0.14746305), dec!(50000)),
            user("christian", "chris1", dec!(0.17582904), dec!(30000)),
        ];

        let holdings = vec![
            holding("AGIF", dec!(5.4), dec!(365.00), "Index Fund", Some("Index")),
            holding("BP", dec!(143.0), dec!(4.41), "BP", Some("Oil & Gas")),
            holding("C", dec!(282.0), dec!(73.64), "Citigroup", Some("Bank")),
            holding(
                "1COV.DE",
                dec!(100.0),
                dec!(60.54),
                "Covestro",
                Some("Chemicals"),
            ),
            holding(
                "HEI.DE",
                dec!(185.0),
                dec!(192.25),
                "Heidelberg Materials",
                Some("Materials"),
            ),
            holding(
                "EXV1.DE",
                dec!(284.0),
                dec!(27.83),
                "Index Fund",
                Some("European Banks"),
            ),
            holding("URTH", dec!(493.0), dec!(100.48), "Index Fund", Some("Index")),
            holding("DAX", dec!(60.0), dec!(217.75), "Index Fund", Some("DAX")),
            holding("PLTR", dec!(85.0), dec!(113.08), "Palantir", Some("Software")),
            holding("SHEL", dec!(74.0), dec!(30.61), "Shell", Some("Oil & Gas")),
            holding("WFC", dec!(340.0), dec!(70.36), "Wells Fargo", Some("Bank")),
            holding(
                "3BAL.L",
                dec!(7.5),
                dec!(29.70),
                "Index Fund",
                Some("European Banks"),
            ),
            holding(
                "DBPG.DE",
                dec!(47.0),
                dec!(212.65),
                "Index Fund",
                Some("Index"),
            ),
            holding("GS", dec!(8.0), dec!(608.10), "Goldman Sachs", Some("Bank")),
            holding(
                "LUV",
                dec!(80.0),
                dec!(28.79),
                "Southwest (Airline)",
                Some("Airlines"),
            ),
            holding(
                "UAL",
                dec!(50.0),
                dec!(68.92),
                "United (Airline)",
                Some("Airlines"),
            ),
            holding(CASH_SYMBOL, dec!(81358.0), dec!(1.00), "Cash", None),
        ];

        Self { users, holdings }
    }
}

fn user(
    username: &str,
    password: &str,
    portfolio_percentage: rust_decimal::Decimal,
    initial_investment: rust_decimal::Decimal,
) -> User {
    User {
        username: username.to_string(),
        password: password.to_string(),
        portfolio_percentage,
        initial_investment,
    }
}

fn holding(
    symbol: &str,
    quantity: rust_decimal::Decimal,
    baseline_price: rust_decimal::Decimal,
    name: &str,
    industry: Option<&str>,
) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        quantity,
        baseline_price,
        name: name.to_string(),
        industry: industry.map(str::to_string),
    }
}
