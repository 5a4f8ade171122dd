//! SQLite plumbing for the bar cache.
//!
//! [`connection::connect_sqlite`] opens a file with the cache PRAGMAs applied
//! (WAL, busy timeout). [`migrate::run_all`] applies the embedded schema to a
//! bare path or a `sqlite:` URL and refuses other backends.

pub mod connection;
pub mod migrate;
