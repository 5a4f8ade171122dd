//! Local cache of daily bars and the reconciler that keeps it current.
//!
//! - [`store`]: the SQLite-backed [`store::SeriesStore`].
//! - [`plan`]: splitting a request into cached and missing ranges.
//! - [`reconcile`]: the [`reconcile::Reconciler`] tying store and source together.
//! - [`providers`]: building a [`market_data_ingestor::source::SourceClient`] from configuration.

#![deny(missing_docs)]

pub mod dates;
pub mod db;
pub mod error;
pub mod models;
pub mod plan;
pub mod providers;
pub mod reconcile;
/// Diesel table definitions for the embedded migrations.
#[allow(missing_docs)]
pub mod schema;
pub mod store;

pub use error::ReconcileError;
pub use plan::{DateRange, FetchPlan, plan_fetch};
pub use reconcile::{Reconciler, Reconciliation, merge_series};
pub use store::{SeriesStore, SqliteBarStore};
