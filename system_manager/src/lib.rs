//! Caller-facing scoring pipeline and the trading job built on top of it.
//!
//! [`pipeline::ScoringPipeline::get_score`] composes the reconciler and the
//! trend scorer. [`job::TradingJob`] adds the collaborators (account,
//! sentiment, notifier) and a [`decision::DecisionMaker`] for one run of the
//! `stock-trading-bot` binary.

pub mod collaborators;
pub mod decision;
pub mod error;
pub mod job;
pub mod pipeline;

pub use error::ScoreError;
pub use pipeline::ScoringPipeline;
