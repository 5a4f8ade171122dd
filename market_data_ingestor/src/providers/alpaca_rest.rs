//! Alpaca Market Data REST provider (daily stock and crypto bars).

pub mod params;
pub mod provider;
pub mod response;

pub use provider::AlpacaProvider;
