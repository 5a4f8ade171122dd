#![allow(dead_code)]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use asset_sync::{SeriesStore, SqliteBarStore};
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use market_data_ingestor::{
    models::{
        asset::AssetClass,
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
    },
    providers::{ApiSnafu, DataProvider, ProviderError},
    source::SourceClient,
};
use system_manager::collaborators::Notifier;
use tempfile::TempDir;

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Migrated store in a temp dir.
pub fn temp_store() -> (TempDir, SqliteBarStore) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("bars.db").to_string_lossy().to_string();
    let store = SqliteBarStore::open(path).expect("open store");
    (dir, store)
}

/// Close on `date`: grows 10% a day from 100 on 2024-01-01.
pub fn geometric_close(date: NaiveDate) -> f64 {
    let i = (date - ymd(2024, 1, 1)).num_days() as i32;
    100.0 * 1.1f64.powi(i)
}

pub fn bar(date: NaiveDate, close: f64) -> Bar {
    Bar {
        date,
        open: close,
        high: close,
        low: close,
        close,
        volume: 10.0,
        trade_count: 3,
        vwap: close,
    }
}

pub fn geometric_bars(start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
    let mut out = Vec::new();
    let mut d = start;
    while d <= end {
        out.push(bar(d, geometric_close(d)));
        d = d + Days::new(1);
    }
    out
}

pub fn seed(store: &SqliteBarStore, symbol: &str, asset_class: AssetClass, bars: Vec<Bar>) {
    let n = bars.len();
    let inserted = store.write(&BarSeries::daily(symbol, asset_class, bars), symbol, asset_class);
    assert_eq!(inserted, n);
}

/// Every-day bars following [`geometric_close`]; counts calls.
#[derive(Clone, Default)]
pub struct GeometricProvider {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DataProvider for GeometricProvider {
    fn name(&self) -> &'static str {
        "geometric"
    }

    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let start = params.start.date_naive();
        let end = (params.end - chrono::Duration::days(1)).date_naive();
        Ok(vec![BarSeries::daily(
            params.symbols[0].clone(),
            params.asset_class,
            geometric_bars(start, end),
        )])
    }
}

/// Succeeds with no bars at all.
pub struct EmptyProvider;

#[async_trait]
impl DataProvider for EmptyProvider {
    fn name(&self) -> &'static str {
        "empty"
    }

    async fn fetch_bars(&self, _: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        Ok(vec![])
    }
}

#[derive(Clone, Default)]
pub struct DownProvider {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl DataProvider for DownProvider {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn fetch_bars(&self, _: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ApiSnafu {
            status: 503u16,
            message: "service unavailable",
        }
        .fail()
    }
}

pub fn client<P: DataProvider + Send + Sync + 'static>(p: P) -> SourceClient {
    SourceClient::new(Box::new(p), Duration::from_secs(5))
}

/// Keeps every message it is handed.
#[derive(Default)]
pub struct CapturingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl Notifier for CapturingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}
