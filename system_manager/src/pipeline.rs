use std::sync::Arc;

use asset_sync::{Reconciler, SeriesStore};
use chrono::NaiveDate;
use market_data_ingestor::{models::asset::AssetClass, source::SourceClient};
use trend_analysis::{TrendConfig, TrendSample, TrendScorer};

use crate::error::ScoreError;

/// Reconcile the requested range, then score it.
pub struct ScoringPipeline {
    reconciler: Reconciler,
}

impl ScoringPipeline {
    pub fn new(reconciler: Reconciler) -> Self {
        Self { reconciler }
    }

    pub fn from_parts(store: Arc<dyn SeriesStore>, source: SourceClient) -> Self {
        Self::new(Reconciler::new(store, source))
    }

    /// Full per-point trend table for `[start, end]`.
    ///
    /// Fails with [`ScoreError::NoDataAvailable`] when the merged series is empty.
    pub async fn analyze(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        start: NaiveDate,
        end: NaiveDate,
        config: TrendConfig,
    ) -> Result<Vec<TrendSample>, ScoreError> {
        let series = self
            .reconciler
            .fetch_series(symbol, asset_class, start, end)
            .await?;

        if series.is_empty() {
            return Err(ScoreError::NoDataAvailable {
                symbol: symbol.to_string(),
                asset_class,
                start,
                end,
            });
        }

        let points: Vec<(NaiveDate, f64)> = series.bars.iter().map(|b| (b.date, b.close)).collect();
        Ok(TrendScorer::new(config).analyze(&points))
    }

    /// Score at the last bar of `[start, end]`.
    pub async fn get_score(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        start: NaiveDate,
        end: NaiveDate,
        config: TrendConfig,
    ) -> Result<i32, ScoreError> {
        let samples = self.analyze(symbol, asset_class, start, end, config).await?;
        let last = samples.last().ok_or_else(|| ScoreError::NoDataAvailable {
            symbol: symbol.to_string(),
            asset_class,
            start,
            end,
        })?;

        tracing::info!(
            symbol,
            %asset_class,
            date = %last.date,
            trend = %last.trend,
            score = last.score,
            "technical score"
        );
        Ok(last.score)
    }
}
