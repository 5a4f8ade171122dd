use asset_sync::ReconcileError;
use chrono::NaiveDate;
use market_data_ingestor::models::asset::AssetClass;

/// Errors from [`crate::pipeline::ScoringPipeline`].
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ScoreError {
    /// Invalid range or unsupported asset class.
    #[error(transparent)]
    Reconcile(ReconcileError),

    /// Nothing cached and nothing fetched for the range.
    #[error("no data available for {symbol} ({asset_class}) in {start}..={end}")]
    NoDataAvailable {
        symbol: String,
        asset_class: AssetClass,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl From<ReconcileError> for ScoreError {
    fn from(e: ReconcileError) -> Self {
        match e {
            ReconcileError::NoDataAvailable {
                symbol,
                asset_class,
                start,
                end,
            } => ScoreError::NoDataAvailable {
                symbol,
                asset_class,
                start,
                end,
            },
            other => ScoreError::Reconcile(other),
        }
    }
}
