//! Trend scorer: per-point SMA crossover strength, its slope, and the score table.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{slope::trailing_slopes, sma::rolling_mean};

/// Slope above which the strength is considered rising (and below whose
/// negation it is falling), in percentage points per bar.
pub const SLOPE_THRESHOLD: f64 = 0.5;

/// Every score [`score_for`] can return, ascending.
pub const SCORE_VALUES: [i32; 12] = [-7, -5, -4, -2, -1, 0, 2, 4, 5, 7, 8, 10];

// Rows: strength > 25, (15, 25], (5, 15], (-5, 5], <= -5.
// Columns: Increasing, Stable, Decreasing.
const SCORE_TABLE: [[i32; 3]; 5] = [
    [10, 8, 5],
    [7, 5, 2],
    [4, 2, 0],
    [-1, -1, -2],
    [-4, -5, -7],
];

/// Index of the near-zero band, also used when strength is undefined.
const NEUTRAL_BAND: usize = 3;

/// Rejected window combination.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrendConfigError {
    /// `short_window` was 0.
    #[error("short window must be at least 1")]
    ZeroShortWindow,
    /// `short_window >= long_window`.
    #[error("short window ({short}) must be smaller than long window ({long})")]
    ShortNotBelowLong { short: usize, long: usize },
    /// `trend_window` was 0.
    #[error("trend window must be at least 1")]
    ZeroTrendWindow,
}

/// Window lengths, in bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendConfig {
    short_window: usize,
    long_window: usize,
    trend_window: usize,
}

impl TrendConfig {
    /// Requires `1 <= short < long` and `trend >= 1`.
    pub fn new(
        short_window: usize,
        long_window: usize,
        trend_window: usize,
    ) -> Result<Self, TrendConfigError> {
        if short_window == 0 {
            return Err(TrendConfigError::ZeroShortWindow);
        }
        if short_window >= long_window {
            return Err(TrendConfigError::ShortNotBelowLong {
                short: short_window,
                long: long_window,
            });
        }
        if trend_window == 0 {
            return Err(TrendConfigError::ZeroTrendWindow);
        }
        Ok(Self {
            short_window,
            long_window,
            trend_window,
        })
    }

    /// Bars in the short SMA.
    pub fn short_window(&self) -> usize {
        self.short_window
    }

    /// Bars in the long SMA.
    pub fn long_window(&self) -> usize {
        self.long_window
    }

    /// Strength points fed to the slope.
    pub fn trend_window(&self) -> usize {
        self.trend_window
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            short_window: 10,
            long_window: 50,
            trend_window: 5,
        }
    }
}

/// Direction of the strength over the trend window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Increasing,
    Stable,
    Decreasing,
}

impl TrendLabel {
    /// Label for a strength slope; undefined slopes are `Stable`.
    pub fn from_slope(slope: Option<f64>) -> Self {
        match slope {
            Some(s) if s > SLOPE_THRESHOLD => TrendLabel::Increasing,
            Some(s) if s < -SLOPE_THRESHOLD => TrendLabel::Decreasing,
            _ => TrendLabel::Stable,
        }
    }

    fn column(self) -> usize {
        match self {
            TrendLabel::Increasing => 0,
            TrendLabel::Stable => 1,
            TrendLabel::Decreasing => 2,
        }
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TrendLabel::Increasing => "Increasing",
            TrendLabel::Stable => "Stable",
            TrendLabel::Decreasing => "Decreasing",
        };
        f.write_str(s)
    }
}

fn band(strength: Option<f64>) -> usize {
    match strength {
        Some(s) if s > 25.0 => 0,
        Some(s) if s > 15.0 => 1,
        Some(s) if s > 5.0 => 2,
        Some(s) if s > -5.0 => 3,
        Some(_) => 4,
        None => NEUTRAL_BAND,
    }
}

/// Score for a strength percentage and trend label.
///
/// An undefined strength falls in the `(-5, 5]` band.
pub fn score_for(strength_percent: Option<f64>, label: TrendLabel) -> i32 {
    SCORE_TABLE[band(strength_percent)][label.column()]
}

/// One analysed point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSample {
    pub date: NaiveDate,
    pub close: f64,
    /// Mean close over the trailing short window (partial at the start).
    pub sma_short: f64,
    /// Mean close over the trailing long window (partial at the start).
    pub sma_long: f64,
    /// `(sma_short - sma_long) / sma_long * 100`; `None` when `sma_long` is
    /// zero or the result is not finite.
    pub strength_percent: Option<f64>,
    /// Least-squares slope of `strength_percent` over the trend window.
    pub strength_slope: Option<f64>,
    pub trend: TrendLabel,
    /// One of [`SCORE_VALUES`].
    pub score: i32,
}

fn strength(sma_short: f64, sma_long: f64) -> Option<f64> {
    if sma_long == 0.0 {
        return None;
    }
    let s = (sma_short - sma_long) / sma_long * 100.0;
    s.is_finite().then_some(s)
}

/// SMA crossover scorer over a close-price series.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendScorer {
    config: TrendConfig,
}

impl TrendScorer {
    /// Scorer with the given windows.
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Windows in use.
    pub fn config(&self) -> TrendConfig {
        self.config
    }

    /// Per-point table for an ascending `(date, close)` series.
    pub fn analyze(&self, points: &[(NaiveDate, f64)]) -> Vec<TrendSample> {
        let closes: Vec<f64> = points.iter().map(|(_, c)| *c).collect();
        let sma_short = rolling_mean(&closes, self.config.short_window);
        let sma_long = rolling_mean(&closes, self.config.long_window);
        let strengths: Vec<Option<f64>> = sma_short
            .iter()
            .zip(&sma_long)
            .map(|(s, l)| strength(*s, *l))
            .collect();
        let slopes = trailing_slopes(&strengths, self.config.trend_window);

        let samples: Vec<TrendSample> = points
            .iter()
            .enumerate()
            .map(|(i, (date, close))| {
                let trend = TrendLabel::from_slope(slopes[i]);
                TrendSample {
                    date: *date,
                    close: *close,
                    sma_short: sma_short[i],
                    sma_long: sma_long[i],
                    strength_percent: strengths[i],
                    strength_slope: slopes[i],
                    trend,
                    score: score_for(strengths[i], trend),
                }
            })
            .collect();

        if let Some(last) = samples.last() {
            tracing::debug!(
                points = samples.len(),
                date = %last.date,
                strength = ?last.strength_percent,
                slope = ?last.strength_slope,
                trend = %last.trend,
                score = last.score,
                "trend analysis"
            );
        }
        samples
    }

    /// Score at the last point, or `None` for an empty series.
    pub fn score(&self, points: &[(NaiveDate, f64)]) -> Option<i32> {
        self.analyze(points).last().map(|s| s.score)
    }
}
