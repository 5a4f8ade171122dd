mod common;
use common::*;

use std::sync::{Arc, atomic::Ordering};

use asset_sync::{ReconcileError, SqliteBarStore};
use market_data_ingestor::models::asset::AssetClass;
use system_manager::{ScoreError, ScoringPipeline};
use trend_analysis::{TrendConfig, TrendLabel};

fn cfg() -> TrendConfig {
    TrendConfig::new(10, 50, 5).unwrap()
}

#[tokio::test]
async fn fresh_fetch_of_strong_uptrend_scores_ten() {
    let (_dir, store) = temp_store();
    let provider = GeometricProvider::default();
    let pipeline = ScoringPipeline::from_parts(Arc::new(store.clone()), client(provider.clone()));

    let score = pipeline
        .get_score("BTC/USD", AssetClass::Crypto, ymd(2024, 1, 1), ymd(2024, 1, 30), cfg())
        .await
        .unwrap();

    assert_eq!(score, 10);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.count("BTC/USD", AssetClass::Crypto).unwrap(), 30);
}

#[tokio::test]
async fn fully_cached_range_scores_while_source_is_down() {
    let (_dir, store) = temp_store();
    seed(
        &store,
        "BTC/USD",
        AssetClass::Crypto,
        geometric_bars(ymd(2024, 1, 1), ymd(2024, 1, 30)),
    );

    let down = DownProvider::default();
    let pipeline = ScoringPipeline::from_parts(Arc::new(store), client(down.clone()));
    let score = pipeline
        .get_score("BTC/USD", AssetClass::Crypto, ymd(2024, 1, 1), ymd(2024, 1, 30), cfg())
        .await
        .unwrap();

    assert_eq!(score, 10);
    assert_eq!(down.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn partially_cached_range_still_scores_when_source_fails() {
    let (_dir, store) = temp_store();
    seed(
        &store,
        "BTC/USD",
        AssetClass::Crypto,
        geometric_bars(ymd(2024, 1, 1), ymd(2024, 1, 30)),
    );

    let down = DownProvider::default();
    let pipeline = ScoringPipeline::from_parts(Arc::new(store), client(down.clone()));
    let samples = pipeline
        .analyze("BTC/USD", AssetClass::Crypto, ymd(2024, 1, 1), ymd(2024, 2, 5), cfg())
        .await
        .unwrap();

    assert_eq!(down.calls.load(Ordering::SeqCst), 1);
    assert_eq!(samples.len(), 30);
    assert_eq!(samples.last().unwrap().date, ymd(2024, 1, 30));
    assert_eq!(samples.last().unwrap().trend, TrendLabel::Increasing);
}

#[tokio::test]
async fn nothing_cached_and_source_down_is_no_data() {
    let (_dir, store) = temp_store();
    let pipeline = ScoringPipeline::from_parts(Arc::new(store), client(DownProvider::default()));
    let err = pipeline
        .get_score("AAPL", AssetClass::Equity, ymd(2024, 1, 1), ymd(2024, 1, 10), cfg())
        .await
        .unwrap_err();
    assert!(matches!(err, ScoreError::NoDataAvailable { .. }));
}

#[tokio::test]
async fn empty_fetch_is_no_data() {
    let (_dir, store) = temp_store();
    let pipeline = ScoringPipeline::from_parts(Arc::new(store), client(EmptyProvider));
    let err = pipeline
        .get_score("AAPL", AssetClass::Equity, ymd(2024, 1, 6), ymd(2024, 1, 7), cfg())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ScoreError::NoDataAvailable {
            symbol: "AAPL".into(),
            asset_class: AssetClass::Equity,
            start: ymd(2024, 1, 6),
            end: ymd(2024, 1, 7),
        }
    );
}

#[tokio::test]
async fn inverted_range_is_a_caller_error() {
    let (_dir, store) = temp_store();
    let provider = GeometricProvider::default();
    let pipeline = ScoringPipeline::from_parts(Arc::new(store), client(provider.clone()));
    let err = pipeline
        .get_score("AAPL", AssetClass::Equity, ymd(2024, 2, 1), ymd(2024, 1, 1), cfg())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ScoreError::Reconcile(ReconcileError::InvalidRange { .. })
    ));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn repeated_scoring_only_fetches_new_days() {
    let (_dir, store) = temp_store();
    let provider = GeometricProvider::default();
    let pipeline = ScoringPipeline::from_parts(Arc::new(store.clone()), client(provider.clone()));

    pipeline
        .get_score("ETH/USD", AssetClass::Crypto, ymd(2024, 1, 1), ymd(2024, 1, 15), cfg())
        .await
        .unwrap();
    pipeline
        .get_score("ETH/USD", AssetClass::Crypto, ymd(2024, 1, 1), ymd(2024, 1, 15), cfg())
        .await
        .unwrap();
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    pipeline
        .get_score("ETH/USD", AssetClass::Crypto, ymd(2024, 1, 1), ymd(2024, 1, 20), cfg())
        .await
        .unwrap();
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.count("ETH/USD", AssetClass::Crypto).unwrap(), 20);
}

#[tokio::test]
async fn unopenable_store_still_scores_from_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("bars.db");
    let store = SqliteBarStore::open_or_degrade(path.to_string_lossy().to_string());

    let provider = GeometricProvider::default();
    let pipeline = ScoringPipeline::from_parts(Arc::new(store), client(provider.clone()));
    let score = pipeline
        .get_score("BTC/USD", AssetClass::Crypto, ymd(2024, 1, 1), ymd(2024, 1, 30), cfg())
        .await
        .unwrap();

    assert_eq!(score, 10);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}
