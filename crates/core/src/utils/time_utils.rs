use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// The exchange timezone used to derive domain dates.
/// Trading-day questions (weekend or not) are answered in NYSE time.
pub const MARKET_TZ: Tz = chrono_tz::America::New_York;

/// Converts a UTC instant to a market date in the exchange timezone.
pub fn market_date_from_utc(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&MARKET_TZ).date_naive()
}

/// Today's date in the exchange timezone.
pub fn market_date_today() -> NaiveDate {
    market_date_from_utc(Utc::now())
}

/// Whether the exchange is closed for the weekend on the given date.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
