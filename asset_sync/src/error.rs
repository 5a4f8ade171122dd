//! Errors surfaced to callers of the reconciler.
//!
//! Storage and source failures are not here: reads degrade to a cache miss,
//! write failures are logged, and an unavailable source falls back to cache.

use chrono::NaiveDate;
use market_data_ingestor::models::asset::AssetClass;

/// Errors returned by [`crate::reconcile::Reconciler`].
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ReconcileError {
    /// `start` is after `end`. Caller error, not retried.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },

    /// The asset class cannot be served.
    #[error("unsupported asset class: {0}")]
    UnsupportedAssetClass(String),

    /// The source failed and nothing was cached for the range.
    #[error("no data available for {symbol} ({asset_class}) in {start}..={end}")]
    NoDataAvailable {
        /// Requested symbol.
        symbol: String,
        /// Requested asset class.
        asset_class: AssetClass,
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },
}
