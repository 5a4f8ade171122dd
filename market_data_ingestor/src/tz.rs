//! Trading-date helpers.
//!
//! Providers stamp daily bars with an instant; the cache keys them by calendar
//! date. Equities use the exchange calendar (America/New_York), so a bar stamped
//! `2024-01-03T05:00:00Z` belongs to 2024-01-03. Crypto trades around the
//! clock and uses the UTC date.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::models::asset::AssetClass;

/// Exchange time zone for US equities.
pub const EQUITY_MARKET_TZ: Tz = chrono_tz::America::New_York;

/// Calendar date a bar stamped at `ts` belongs to.
pub fn trading_date(ts: DateTime<Utc>, asset_class: AssetClass) -> NaiveDate {
    match asset_class {
        AssetClass::Equity => ts.with_timezone(&EQUITY_MARKET_TZ).date_naive(),
        AssetClass::Crypto => ts.date_naive(),
    }
}

/// `date` at 00:00:00Z.
pub fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight UTC after `date`; saturates at the last representable day.
pub fn day_end_exclusive_utc(date: NaiveDate) -> DateTime<Utc> {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
    day_start_utc(next)
}

/// RFC-3339 with offset -> UTC.
pub fn parse_ts_to_utc(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}
