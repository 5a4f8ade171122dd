//! One run of the trading job: score, read sentiment and holdings, decide, notify.

use std::sync::Arc;

use chrono::NaiveDate;
use market_data_ingestor::models::asset::AssetClass;
use serde::Serialize;
use trend_analysis::{TrendConfig, TrendSample};

use crate::{
    collaborators::{AccountManager, AccountSnapshot, Notifier, SentimentScorer},
    decision::{Decision, DecisionMaker},
    error::ScoreError,
    pipeline::ScoringPipeline,
};

/// What to score on each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub symbol: String,
    pub asset_class: AssetClass,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub score: i32,
    pub sentiment: Option<f64>,
    /// `None` if the account could not be read.
    pub account: Option<AccountSnapshot>,
    pub decision: Decision,
    pub samples: Vec<TrendSample>,
}

pub struct TradingJob {
    pipeline: ScoringPipeline,
    trend: TrendConfig,
    decision: DecisionMaker,
    account: Arc<dyn AccountManager>,
    sentiment: Arc<dyn SentimentScorer>,
    notifier: Arc<dyn Notifier>,
}

impl TradingJob {
    pub fn new(
        pipeline: ScoringPipeline,
        trend: TrendConfig,
        decision: DecisionMaker,
        account: Arc<dyn AccountManager>,
        sentiment: Arc<dyn SentimentScorer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            pipeline,
            trend,
            decision,
            account,
            sentiment,
            notifier,
        }
    }

    pub async fn run(&self, req: &JobRequest) -> Result<JobReport, ScoreError> {
        let samples = self
            .pipeline
            .analyze(&req.symbol, req.asset_class, req.start, req.end, self.trend)
            .await?;
        let last = samples.last().ok_or_else(|| ScoreError::NoDataAvailable {
            symbol: req.symbol.clone(),
            asset_class: req.asset_class,
            start: req.start,
            end: req.end,
        })?;
        let score = last.score;

        let sentiment = self.sentiment.score(&req.symbol, req.end).await;
        let account = match self.account.snapshot().await {
            Ok(a) => {
                tracing::info!(holdings = ?a.holdings, balance = a.balance, "account");
                Some(a)
            }
            Err(e) => {
                tracing::warn!(error = ?e, "account unavailable");
                None
            }
        };

        let decision = self.decision.decide(&req.symbol, sentiment, score);
        self.notifier.notify(&format!(
            "{} {}: score {} ({}), decision {:?} x{}",
            req.symbol, last.date, score, last.trend, decision.action, decision.quantity
        ));

        Ok(JobReport {
            score,
            sentiment,
            account,
            decision,
            samples,
        })
    }
}
