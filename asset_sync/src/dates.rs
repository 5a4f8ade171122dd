//! Date <-> TEXT mapping for the `bars.date` column.
//!
//! Dates are stored as `YYYY-MM-DD` so that lexical order equals calendar
//! order and range filters can compare strings directly.

use anyhow::Context;
use chrono::NaiveDate;

const DB_DATE_FMT: &str = "%Y-%m-%d";

/// Format a date for storage.
pub fn to_db(date: NaiveDate) -> String {
    date.format(DB_DATE_FMT).to_string()
}

/// Parse a stored date.
pub fn from_db(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DB_DATE_FMT).with_context(|| format!("bad stored date {s:?}"))
}
