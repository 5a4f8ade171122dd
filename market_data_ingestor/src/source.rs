//! Source client: the single entry point the reconciler uses to pull bars.
//!
//! Wraps a boxed [`DataProvider`], bounds each call with a timeout and hands
//! back one normalized daily [`BarSeries`] covering exactly the requested
//! inclusive date range.

use std::time::Duration;

use chrono::NaiveDate;
use snafu::{Backtrace, Snafu};

use crate::{
    models::{asset::AssetClass, bar::BarSeries, request_params::BarsRequestParams},
    providers::DataProvider,
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SourceError {
    /// The provider cannot serve this asset class.
    #[snafu(display("provider {provider} does not support asset class {asset_class}"))]
    UnsupportedAssetClass {
        asset_class: AssetClass,
        provider: &'static str,
        backtrace: Backtrace,
    },

    /// Network, auth or API failure, or the call did not finish in time.
    #[snafu(display("source unavailable: {message}"))]
    SourceUnavailable {
        message: String,
        backtrace: Backtrace,
    },
}

pub struct SourceClient {
    provider: Box<dyn DataProvider + Send + Sync>,
    timeout: Duration,
}

impl SourceClient {
    pub fn new(provider: Box<dyn DataProvider + Send + Sync>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Daily bars for `symbol` with `start <= date <= end`, ascending and
    /// de-duplicated by date.
    pub async fn fetch(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BarSeries, SourceError> {
        if !self.provider.supports(asset_class) {
            return UnsupportedAssetClassSnafu {
                asset_class,
                provider: self.provider.name(),
            }
            .fail();
        }

        let params = BarsRequestParams::daily(symbol, asset_class, start, end);
        let result = tokio::time::timeout(self.timeout, self.provider.fetch_bars(params)).await;

        let series = match result {
            Err(_) => {
                return SourceUnavailableSnafu {
                    message: format!("{} timed out after {:?}", self.provider.name(), self.timeout),
                }
                .fail();
            }
            Ok(Err(e)) => {
                return SourceUnavailableSnafu {
                    message: format!("{}: {e}", self.provider.name()),
                }
                .fail();
            }
            Ok(Ok(series)) => series,
        };

        let mut out = BarSeries::empty(symbol, asset_class);
        for s in series
            .into_iter()
            .filter(|s| s.symbol.eq_ignore_ascii_case(symbol))
        {
            out.bars.extend(s.bars);
        }
        out.normalize();
        out.retain_range(start, end);

        tracing::debug!(
            symbol,
            %asset_class,
            %start,
            %end,
            bars = out.len(),
            "source fetch complete"
        );
        Ok(out)
    }
}
