//! Series store: persisted daily bars keyed by `(symbol, asset_class, date)`.
//!
//! [`SqliteBarStore`] exposes fallible `try_*` methods returning [`RepoResult`].
//! The [`SeriesStore`] trait is the surface the reconciler sees: reads degrade
//! to "absent"/empty and write failures are logged and reported as zero rows.

use anyhow::Context;
use chrono::NaiveDate;
use diesel::{dsl::max, prelude::*};
use market_data_ingestor::models::{asset::AssetClass, bar::BarSeries};

use crate::{
    dates,
    db::{connection::connect_sqlite, migrate},
    models::{BarRow, NewBarRow},
    schema::bars,
};

/// Result type used by the store's fallible operations.
pub type RepoResult<T> = anyhow::Result<T>;

/// Storage seam used by the reconciler. Implementations never fail outward.
pub trait SeriesStore: Send + Sync {
    /// Latest persisted date for the key, or `None` if there is none or the
    /// store cannot be read.
    fn latest_date(&self, symbol: &str, asset_class: AssetClass) -> Option<NaiveDate>;

    /// Persisted bars with `start <= date <= end`, ascending. Empty on any failure.
    fn read_range(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BarSeries;

    /// Insert bars under the key, skipping dates already present.
    /// Returns the number of rows inserted (zero if the write failed).
    fn write(&self, bars: &BarSeries, symbol: &str, asset_class: AssetClass) -> usize;
}

/// SQLite-backed store. Each call opens its own connection.
#[derive(Debug, Clone)]
pub struct SqliteBarStore {
    database_url: String,
}

impl SqliteBarStore {
    /// Store over `database_url` without touching the database.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Store over `database_url` with migrations applied.
    pub fn open(database_url: impl Into<String>) -> RepoResult<Self> {
        let store = Self::new(database_url);
        migrate::run_all(&store.database_url)?;
        Ok(store)
    }

    /// Like [`open`](Self::open), but an unusable database only costs the
    /// cache: the failure is logged and the returned store degrades every
    /// call to a miss or a dropped write.
    pub fn open_or_degrade(database_url: impl Into<String>) -> Self {
        let database_url = database_url.into();
        match Self::open(database_url.clone()) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(
                    database_url = %database_url,
                    error = ?e,
                    "bar store unavailable, running without cache"
                );
                Self::new(database_url)
            }
        }
    }

    /// Location this store reads and writes.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn connect(&self) -> RepoResult<SqliteConnection> {
        connect_sqlite(&self.database_url)
    }

    /// Fallible form of [`SeriesStore::latest_date`].
    pub fn try_latest_date(
        &self,
        symbol: &str,
        asset_class: AssetClass,
    ) -> RepoResult<Option<NaiveDate>> {
        let mut conn = self.connect()?;
        let latest: Option<String> = bars::table
            .filter(bars::symbol.eq(symbol))
            .filter(bars::asset_class.eq(asset_class.code()))
            .select(max(bars::date))
            .first(&mut conn)
            .context("query latest date")?;

        latest.as_deref().map(dates::from_db).transpose()
    }

    /// Fallible form of [`SeriesStore::read_range`].
    pub fn try_read_range(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<BarSeries> {
        let mut conn = self.connect()?;
        let rows: Vec<BarRow> = bars::table
            .filter(bars::symbol.eq(symbol))
            .filter(bars::asset_class.eq(asset_class.code()))
            .filter(bars::date.ge(dates::to_db(start)))
            .filter(bars::date.le(dates::to_db(end)))
            .order(bars::date.asc())
            .select(BarRow::as_select())
            .load(&mut conn)
            .context("read bar range")?;

        let bars = rows
            .into_iter()
            .map(BarRow::into_bar)
            .collect::<RepoResult<Vec<_>>>()?;
        Ok(BarSeries::daily(symbol, asset_class, bars))
    }

    /// Fallible form of [`SeriesStore::write`]. All rows go in one immediate
    /// transaction; an existing key is left untouched.
    pub fn try_write(
        &self,
        series: &BarSeries,
        symbol: &str,
        asset_class: AssetClass,
    ) -> RepoResult<usize> {
        if series.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connect()?;
        let code = asset_class.code();

        conn.immediate_transaction::<_, anyhow::Error, _>(|conn| {
            let mut inserted = 0;
            for bar in &series.bars {
                let row = NewBarRow::new(symbol, code, bar);
                inserted += diesel::insert_into(bars::table)
                    .values(&row)
                    .on_conflict((bars::symbol, bars::asset_class, bars::date))
                    .do_nothing()
                    .execute(conn)?;
            }
            Ok(inserted)
        })
    }

    /// Number of rows stored for the key.
    pub fn count(&self, symbol: &str, asset_class: AssetClass) -> RepoResult<i64> {
        let mut conn = self.connect()?;
        let n = bars::table
            .filter(bars::symbol.eq(symbol))
            .filter(bars::asset_class.eq(asset_class.code()))
            .count()
            .get_result(&mut conn)?;
        Ok(n)
    }
}

impl SeriesStore for SqliteBarStore {
    fn latest_date(&self, symbol: &str, asset_class: AssetClass) -> Option<NaiveDate> {
        self.try_latest_date(symbol, asset_class)
            .unwrap_or_else(|e| {
                tracing::warn!(symbol, %asset_class, error = ?e, "store unavailable, treating as cache miss");
                None
            })
    }

    fn read_range(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BarSeries {
        self.try_read_range(symbol, asset_class, start, end)
            .unwrap_or_else(|e| {
                tracing::warn!(symbol, %asset_class, error = ?e, "store read failed, returning empty");
                BarSeries::empty(symbol, asset_class)
            })
    }

    fn write(&self, bars: &BarSeries, symbol: &str, asset_class: AssetClass) -> usize {
        match self.try_write(bars, symbol, asset_class) {
            Ok(n) => {
                tracing::info!(symbol, %asset_class, offered = bars.len(), inserted = n, "persisted bars");
                n
            }
            Err(e) => {
                tracing::warn!(symbol, %asset_class, error = ?e, "store write failed, bars not persisted");
                0
            }
        }
    }
}
