//! Canonical in-memory representation of a daily bar (OHLCV + trade count + VWAP).
//!
//! This struct is the standard output for all [`DataProvider`](crate::providers::DataProvider)
//! implementations and the row shape the local store persists, regardless of asset class.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{asset::AssetClass, timeframe::TimeFrame};

/// A single trading-period record.
///
/// Identity within a [`BarSeries`] is the `date`; across the store it is
/// `(symbol, asset_class, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading date the bar belongs to.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval (fractional for crypto).
    pub volume: f64,

    /// Number of trades in the interval.
    pub trade_count: u64,

    /// Volume-weighted average price.
    pub vwap: f64,
}

/// Represents a complete set of bars for a single symbol and asset class.
///
/// After [`BarSeries::normalize`] the bars are strictly ascending by date with
/// no duplicate dates. Gaps (weekends, holidays) are expected.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "AAPL", "BTC/USD").
    pub symbol: String,
    /// Asset class of the symbol.
    pub asset_class: AssetClass,
    /// The time interval for each bar in the series.
    pub timeframe: TimeFrame,
    /// The collection of bars.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    /// An empty daily series.
    pub fn empty(symbol: impl Into<String>, asset_class: AssetClass) -> Self {
        Self::daily(symbol, asset_class, Vec::new())
    }

    /// A daily series holding `bars` as given (call [`normalize`](Self::normalize) if unsure of order).
    pub fn daily(symbol: impl Into<String>, asset_class: AssetClass, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            asset_class,
            timeframe: TimeFrame::day(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Earliest date held.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    /// Latest date held.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }

    /// Sort ascending by date and collapse duplicate dates.
    ///
    /// When a date occurs more than once the bar that appears **later** in
    /// the input wins, so appending fresher rows and normalizing prefers them.
    pub fn normalize(&mut self) {
        let mut by_date: BTreeMap<NaiveDate, Bar> = BTreeMap::new();
        for bar in self.bars.drain(..) {
            by_date.insert(bar.date, bar);
        }
        self.bars = by_date.into_values().collect();
    }

    /// Keep only bars with `start <= date <= end`.
    pub fn retain_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.bars.retain(|b| b.date >= start && b.date <= end);
    }

    /// `true` if dates are strictly ascending.
    pub fn is_normalized(&self) -> bool {
        self.bars.windows(2).all(|w| w[0].date < w[1].date)
    }
}
