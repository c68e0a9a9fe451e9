//! Per-user language selection and currency formatting.
//!
//! The dashboard is bilingual: two of the configured users read German,
//! everyone else English. Amounts are always formatted in euro with
//! thousands separators regardless of language.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Language {
    En,
    De,
}

/// Language preference by username.
pub fn language_for_user(username: &str) -> Language {
    match username {
        "juergen" | "kremer" => Language::De,
        _ => Language::En,
    }
}

/// `€1,234.56`
pub fn format_currency(amount: Decimal) -> String {
    format!("€{}", grouped(amount, false))
}

/// `€+1,234.56` / `€-1,234.56`
pub fn format_currency_change(amount: Decimal) -> String {
    format!("€{}", grouped(amount, true))
}

/// `+4.2%` / `-4.2%`, one decimal place.
pub fn format_signed_pct(pct: Decimal) -> String {
    let rounded = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() {
        format!("{:.1}%", rounded)
    } else {
        format!("+{:.1}%", rounded)
    }
}

/// The weekend notice shown instead of live-market chrome.
pub fn weekend_notice(language: Language) -> &'static str {
    match language {
        Language::En => {
            "It's the weekend. No trading today, but here's the latest available data:"
        }
        Language::De => {
            "Es ist Wochenende. Heute wird nicht gehandelt, aber hier sind die neuesten verfügbaren Daten:"
        }
    }
}

/// Portfolio-changed-since-last-login notice.
pub fn value_change_notice(
    language: Language,
    change: Decimal,
    change_pct: Decimal,
    days_ago: i64,
) -> String {
    let amount = format_currency_change(change);
    let pct = format_signed_pct(change_pct);
    match language {
        Language::En => {
            let when = if days_ago == 1 {
                "since yesterday".to_string()
            } else {
                format!("since {} days ago", days_ago)
            };
            format!("Your portfolio changed by {} ({}) {}.", amount, pct, when)
        }
        Language::De => {
            let when = if days_ago == 1 {
                "seit gestern".to_string()
            } else {
                format!("seit vor {} Tagen", days_ago)
            };
            format!(
                "Ihr Portfolio hat sich um {} ({}) {} verändert.",
                amount, pct, when
            )
        }
    }
}

/// Thousands-grouped rendition of `amount` with two decimal places.
fn grouped(amount: Decimal, signed: bool) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative();
    let rendered = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped_int = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped_int.push(',');
        }
        grouped_int.push(*digit);
    }

    let sign = if negative {
        "-"
    } else if signed {
        "+"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped_int, frac_part)
}
