//! Moving-average trend scoring.
//!
//! A close series goes through [`sma::rolling_mean`] twice (short and long
//! window), the relative gap between the two becomes the *strength*, the
//! least-squares slope of the strength over a trailing window becomes the
//! *trend*, and [`scorer::score_for`] maps both onto a small discrete score.

pub mod scorer;
pub mod slope;
pub mod sma;

pub use scorer::{
    SCORE_VALUES, TrendConfig, TrendConfigError, TrendLabel, TrendSample, TrendScorer, score_for,
};
