//! Diesel models mapping to the database schema.
//!
//! These types mirror the `bars` table defined in the embedded migrations and
//! in [`crate::schema`]. Conversions to and from the vendor-agnostic
//! [`Bar`] live here so the store never handles raw column values.

use diesel::prelude::*;
use market_data_ingestor::models::bar::Bar;

use crate::{dates, schema::bars};

/// A row in [`crate::schema::bars`].
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bars, check_for_backend(diesel::sqlite::Sqlite))]
pub struct BarRow {
    /// Database primary key (SQLite rowid).
    pub id: i32,
    /// Symbol identifier (e.g., "AAPL", "BTC/USD").
    pub symbol: String,
    /// Asset class code, `equity` or `crypto`.
    pub asset_class: String,
    /// Trading date as `YYYY-MM-DD`.
    pub date: String,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Volume traded.
    pub volume: f64,
    /// Number of trades.
    pub trade_count: i64,
    /// Volume-weighted average price.
    pub vwap: f64,
}

impl BarRow {
    /// Convert back to the in-memory bar.
    pub fn into_bar(self) -> anyhow::Result<Bar> {
        Ok(Bar {
            date: dates::from_db(&self.date)?,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            trade_count: u64::try_from(self.trade_count).unwrap_or(0),
            vwap: self.vwap,
        })
    }
}

/// Insertable form of [`BarRow`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bars)]
pub struct NewBarRow<'a> {
    /// Symbol identifier.
    pub symbol: &'a str,
    /// Asset class code.
    pub asset_class: &'a str,
    /// Trading date as `YYYY-MM-DD`.
    pub date: String,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Volume traded.
    pub volume: f64,
    /// Number of trades.
    pub trade_count: i64,
    /// Volume-weighted average price.
    pub vwap: f64,
}

impl<'a> NewBarRow<'a> {
    /// Row for `bar` under the given key.
    pub fn new(symbol: &'a str, asset_class: &'a str, bar: &Bar) -> Self {
        Self {
            symbol,
            asset_class,
            date: dates::to_db(bar.date),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            trade_count: i64::try_from(bar.trade_count).unwrap_or(i64::MAX),
            vwap: bar.vwap,
        }
    }
}
