#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use asset_sync::db::{connection, migrate};
use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use market_data_ingestor::{
    models::{
        asset::AssetClass,
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
    },
    providers::{ApiSnafu, DataProvider, ProviderError},
    source::SourceClient,
};
use tempfile::TempDir;

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}

pub struct TestDb {
    _dir: TempDir,    // keep alive for the life of the test
    pub path: String, // <tmpdir>/test.db
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run_all(&path).expect("migrations");

    // open a connection with PRAGMAs applied
    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    use diesel::sql_query;

    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal"); // WAL is persistent per DB file

    let fk: ForeignKeys = sql_query("PRAGMA foreign_keys;").get_result(conn).unwrap();
    assert_eq!(fk.foreign_keys, 1);

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn bar(date: NaiveDate, close: f64) -> Bar {
    Bar {
        date,
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1_000.0,
        trade_count: 42,
        vwap: close,
    }
}

/// Deterministic close for a date so re-fetches agree with earlier fetches.
pub fn close_for(date: NaiveDate) -> f64 {
    100.0 + date.ordinal() as f64
}

/// Weekday bars for `[start, end]` (crypto gets every day).
pub fn daily_bars(asset_class: AssetClass, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
    let mut out = Vec::new();
    let mut day = start;
    while day <= end {
        let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
        if asset_class == AssetClass::Crypto || !weekend {
            out.push(bar(day, close_for(day)));
        }
        day = day + Days::new(1);
    }
    out
}

/// Inclusive date window a provider was asked for.
pub fn requested_dates(params: &BarsRequestParams) -> (NaiveDate, NaiveDate) {
    let start = params.start.date_naive();
    let end = (params.end - chrono::Duration::days(1)).date_naive();
    (start, end)
}

/// Provider that fabricates bars for whatever window it is asked for and
/// records every request.
#[derive(Clone, Default)]
pub struct RecordingProvider {
    pub calls: Arc<Mutex<Vec<(NaiveDate, NaiveDate)>>>,
}

impl RecordingProvider {
    pub fn requests(&self) -> Vec<(NaiveDate, NaiveDate)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        let (start, end) = requested_dates(&params);
        self.calls.lock().unwrap().push((start, end));
        Ok(params
            .symbols
            .iter()
            .map(|s| {
                BarSeries::daily(
                    s.clone(),
                    params.asset_class,
                    daily_bars(params.asset_class, start, end),
                )
            })
            .collect())
    }
}

/// Always fails as an upstream outage would; counts attempts.
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

/// Never answers within any reasonable timeout.
pub struct HangingProvider;

#[async_trait]
impl DataProvider for HangingProvider {
    fn name(&self) -> &'static str {
        "hanging"
    }

    async fn fetch_bars(&self, _: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![])
    }
}

/// Serves equities only.
pub struct EquityOnlyProvider;

#[async_trait]
impl DataProvider for EquityOnlyProvider {
    fn name(&self) -> &'static str {
        "equity-only"
    }

    fn supports(&self, asset_class: AssetClass) -> bool {
        asset_class == AssetClass::Equity
    }

    async fn fetch_bars(&self, _: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        Ok(vec![])
    }
}

pub fn client<P: DataProvider + Send + Sync + 'static>(p: P) -> SourceClient {
    SourceClient::new(Box::new(p), Duration::from_secs(5))
}
