use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use trend_analysis::{SCORE_VALUES, TrendConfig, TrendLabel, TrendScorer};

fn series(closes: &[f64]) -> Vec<(NaiveDate, f64)> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, c)| (start + Days::new(i as u64), *c))
        .collect()
}

fn cfg(short: usize, long: usize, trend: usize) -> TrendConfig {
    TrendConfig::new(short, long, trend).unwrap()
}

#[test]
fn strong_accelerating_uptrend_scores_ten() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 * 1.1f64.powi(i)).collect();
    let samples = TrendScorer::new(cfg(10, 50, 5)).analyze(&series(&closes));

    let last = samples.last().unwrap();
    assert!(last.sma_short > last.sma_long);
    assert!(last.strength_percent.unwrap() > 25.0);
    assert!(last.strength_slope.unwrap() > 0.5);
    assert_eq!(last.trend, TrendLabel::Increasing);
    assert_eq!(last.score, 10);
}

#[test]
fn steady_decline_scores_minus_seven() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 * 0.9f64.powi(i)).collect();
    let scorer = TrendScorer::new(cfg(10, 50, 5));
    let last = scorer.analyze(&series(&closes)).pop().unwrap();
    assert!(last.strength_percent.unwrap() <= -5.0);
    assert_eq!(last.trend, TrendLabel::Decreasing);
    assert_eq!(scorer.score(&series(&closes)), Some(-7));
}

#[test]
fn zero_long_average_is_stable_near_zero_band() {
    let closes = vec![0.0; 12];
    let last = TrendScorer::new(cfg(3, 6, 4))
        .analyze(&series(&closes))
        .pop()
        .unwrap();
    assert_eq!(last.sma_long, 0.0);
    assert_eq!(last.strength_percent, None);
    assert_eq!(last.strength_slope, None);
    assert_eq!(last.trend, TrendLabel::Stable);
    assert_eq!(last.score, -1);
}

#[test]
fn single_point_is_a_best_effort_score() {
    let scorer = TrendScorer::default();
    let samples = scorer.analyze(&series(&[42.0]));
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].strength_percent, Some(0.0));
    assert_eq!(samples[0].strength_slope, None);
    assert_eq!(samples[0].trend, TrendLabel::Stable);
    assert_eq!(samples[0].score, -1);
}

#[test]
fn empty_series_has_no_score() {
    assert!(TrendScorer::default().analyze(&[]).is_empty());
    assert_eq!(TrendScorer::default().score(&[]), None);
}

#[test]
fn flat_prices_are_neutral_everywhere() {
    let samples = TrendScorer::default().analyze(&series(&[10.0; 60]));
    assert!(samples.iter().all(|s| s.score == -1 && s.trend == TrendLabel::Stable));
}

#[test]
fn table_serializes_for_display() {
    let samples = TrendScorer::new(cfg(2, 3, 2)).analyze(&series(&[1.0, 2.0, 3.0]));
    let json = serde_json::to_value(&samples).unwrap();
    assert_eq!(json[0]["date"], "2024-01-01");
    assert_eq!(json[0]["strength_slope"], serde_json::Value::Null);
    assert_eq!(json[2]["trend"], "increasing");
}

proptest! {
    #[test]
    fn score_is_always_in_the_table(
        closes in proptest::collection::vec(-1.0e6f64..1.0e6, 0..80),
        short in 1usize..15,
        extra in 1usize..40,
        trend in 1usize..10,
    ) {
        let scorer = TrendScorer::new(cfg(short, short + extra, trend));
        for s in scorer.analyze(&series(&closes)) {
            prop_assert!(SCORE_VALUES.contains(&s.score), "score {} not allowed", s.score);
        }
    }

    #[test]
    fn one_sample_per_point(closes in proptest::collection::vec(0.01f64..1.0e4, 0..60)) {
        let pts = series(&closes);
        let samples = TrendScorer::default().analyze(&pts);
        prop_assert_eq!(samples.len(), pts.len());
        for (s, (d, c)) in samples.iter().zip(&pts) {
            prop_assert_eq!(s.date, *d);
            prop_assert_eq!(s.close, *c);
        }
    }
}
