use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::{asset::AssetClass, timeframe::TimeFrame},
    providers::alpaca_rest::params::AlpacaBarsParams,
    tz,
};

/// Universal parameters for requesting time-series bar data from any market data provider.
///
/// This struct is vendor-agnostic. It is the standard input for all
/// [`DataProvider`](crate::providers::DataProvider) implementations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarsRequestParams {
    /// List of symbols to request (e.g., `["AAPL"]`, `["BTC/USD"]`).
    pub symbols: Vec<String>,

    /// The time interval for each bar.
    ///
    /// Providers reject anything but [`TimeFrame::day`] via
    /// [`TimeFrame::validate`].
    pub timeframe: TimeFrame,

    /// Start of the requested time range (inclusive, UTC).
    pub start: DateTime<Utc>,

    /// End of the requested time range (exclusive, UTC).
    pub end: DateTime<Utc>,

    /// The asset class for the requested symbols.
    ///
    /// This helps providers route the request to the correct API or endpoint.
    pub asset_class: AssetClass,

    /// Optional, provider-specific parameters.
    #[serde(default)]
    pub provider_specific: ProviderParams,
}

impl BarsRequestParams {
    /// Daily bars for one symbol over the inclusive date range `[start, end]`.
    ///
    /// The dates become the half-open UTC window `[start 00:00Z, end+1 00:00Z)`.
    pub fn daily(symbol: &str, asset_class: AssetClass, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            symbols: vec![symbol.to_string()],
            timeframe: TimeFrame::day(),
            start: tz::day_start_utc(start),
            end: tz::day_end_exclusive_utc(end),
            asset_class,
            provider_specific: ProviderParams::None,
        }
    }
}

/// An enum to hold provider-specific request parameters.
///
/// This allows callers to specify detailed, per-request options for a
/// particular provider without cluttering the universal `BarsRequestParams`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum ProviderParams {
    #[default]
    None,
    Alpaca(AlpacaBarsParams),
}
