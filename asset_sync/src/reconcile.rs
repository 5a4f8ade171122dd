//! The reconciler: serve a date range from cache, fetch only what is missing,
//! persist it, and return the merged series.
//!
//! A request makes at most one source call. A source that is unavailable
//! (error or timeout) degrades the request to cached data; only when the cache
//! is empty as well does the request fail with
//! [`ReconcileError::NoDataAvailable`].

use std::sync::Arc;

use chrono::NaiveDate;
use market_data_ingestor::{
    models::{asset::AssetClass, bar::BarSeries},
    source::{SourceClient, SourceError},
};

use crate::{
    error::ReconcileError,
    plan::{DateRange, FetchPlan, plan_fetch},
    store::SeriesStore,
};

/// Merge cached and fetched bars for one key.
///
/// The result is ascending with one bar per date. On overlap the fetched bar
/// replaces the cached one.
pub fn merge_series(cached: BarSeries, fetched: BarSeries) -> BarSeries {
    let mut merged = cached;
    merged.bars.extend(fetched.bars);
    merged.normalize();
    merged
}

/// Outcome of one [`Reconciler::reconcile`] call.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Merged series covering the request.
    pub series: BarSeries,
    /// What was read from the store and requested from the source.
    pub plan: FetchPlan,
    /// Bars returned by the source (zero if not called or unavailable).
    pub fetched: usize,
    /// Rows newly written to the store.
    pub inserted: usize,
    /// The source was called and was unavailable.
    pub source_failed: bool,
}

/// Reconciles cached and fresh bars for caller-supplied ranges.
pub struct Reconciler {
    store: Arc<dyn SeriesStore>,
    source: SourceClient,
}

impl Reconciler {
    /// Reconciler over `store`, filling gaps from `source`.
    pub fn new(store: Arc<dyn SeriesStore>, source: SourceClient) -> Self {
        Self { store, source }
    }

    /// Series for `symbol` over `[start, end]`, fetching and persisting only
    /// the days after the latest cached date.
    pub async fn fetch_series(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BarSeries, ReconcileError> {
        self.reconcile(symbol, asset_class, start, end)
            .await
            .map(|r| r.series)
    }

    /// Like [`fetch_series`](Self::fetch_series) but reports the plan and counts.
    pub async fn reconcile(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Reconciliation, ReconcileError> {
        let range = DateRange::new(start, end)?;

        let latest = self.store.latest_date(symbol, asset_class);
        let plan = plan_fetch(latest, range);
        tracing::debug!(symbol, %asset_class, ?latest, ?plan, "fetch plan");

        let cached = match plan.cached {
            Some(c) => self.store.read_range(symbol, asset_class, c.start(), c.end()),
            None => BarSeries::empty(symbol, asset_class),
        };

        let mut fetched = BarSeries::empty(symbol, asset_class);
        let mut inserted = 0;
        let mut source_failed = false;

        if let Some(missing) = plan.missing {
            match self
                .source
                .fetch(symbol, asset_class, missing.start(), missing.end())
                .await
            {
                Ok(series) => {
                    tracing::info!(
                        symbol,
                        %asset_class,
                        range = %missing,
                        bars = series.len(),
                        provider = self.source.provider_name(),
                        "fetched missing range"
                    );
                    inserted = self.store.write(&series, symbol, asset_class);
                    fetched = series;
                }
                Err(SourceError::UnsupportedAssetClass { asset_class, .. }) => {
                    return Err(ReconcileError::UnsupportedAssetClass(asset_class.to_string()));
                }
                Err(e @ SourceError::SourceUnavailable { .. }) => {
                    tracing::warn!(
                        symbol,
                        %asset_class,
                        range = %missing,
                        error = %e,
                        cached = cached.len(),
                        "source unavailable, serving cached bars only"
                    );
                    source_failed = true;
                }
            }
        }

        if source_failed && cached.is_empty() {
            return Err(ReconcileError::NoDataAvailable {
                symbol: symbol.to_string(),
                asset_class,
                start,
                end,
            });
        }

        let fetched_count = fetched.len();
        let series = merge_series(cached, fetched);
        Ok(Reconciliation {
            series,
            plan,
            fetched: fetched_count,
            inserted,
            source_failed,
        })
    }
}
