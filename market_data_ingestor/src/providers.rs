//! Vendor seam for daily bar downloads.
//!
//! A [`DataProvider`] turns one [`BarsRequestParams`] into per-symbol
//! [`BarSeries`]. Callers hold providers as `Box<dyn DataProvider + Send + Sync>`
//! so the vendor can be picked from settings at startup; [`crate::source`]
//! wraps one with a timeout and normalization.
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_ingestor::models::{bar::BarSeries, request_params::BarsRequestParams};
//! use market_data_ingestor::providers::{DataProvider, ProviderError};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl DataProvider for Offline {
//!     fn name(&self) -> &'static str {
//!         "offline"
//!     }
//!
//!     async fn fetch_bars(&self, p: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
//!         Ok(p.symbols.iter().map(|s| BarSeries::empty(s.clone(), p.asset_class)).collect())
//!     }
//! }
//! ```

pub mod alpaca_rest;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::{asset::AssetClass, bar::BarSeries, request_params::BarsRequestParams};

/// A market data vendor able to serve daily bars.
#[async_trait]
pub trait DataProvider {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Whether this provider can serve `asset_class` at all.
    fn supports(&self, _asset_class: AssetClass) -> bool {
        true
    }

    /// Bars for every requested symbol; symbols with no data may be omitted.
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError>;
}

/// Provider construction failures.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// Credentials were not set.
    #[snafu(display("provider credentials not configured: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    #[snafu(display("could not build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// A credential is not a valid header value.
    #[snafu(display("credential is not a valid header value: {source}"))]
    InvalidApiKey {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Failures while a provider serves a request.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// Transport or decode failure.
    #[snafu(display("bars request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// Non-success HTTP status with the response body.
    #[snafu(display("vendor returned {status}: {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },

    /// The vendor cannot serve this request shape.
    #[snafu(display("request rejected by provider: {message}"))]
    Validation {
        message: String,
        backtrace: Backtrace,
    },
}
