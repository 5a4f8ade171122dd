//! Market data models and sources.
//!
//! - [`models`]: vendor-agnostic bars, series, asset classes, and request parameters.
//! - [`providers`]: the [`providers::DataProvider`] seam and the Alpaca REST implementation.
//! - [`source`]: [`source::SourceClient`], the timeout-bounded, normalizing front of a provider.
//! - [`tz`]: mapping provider timestamps onto trading dates.

pub mod models;
pub mod providers;
pub mod source;
pub mod tz;
