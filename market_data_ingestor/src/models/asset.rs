use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Asset classes the pipeline knows how to fetch and cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// US-listed equities.
    Equity,
    /// Crypto pairs (e.g. "BTC/USD").
    Crypto,
}

impl AssetClass {
    /// Stable storage code.
    pub const fn code(self) -> &'static str {
        match self {
            AssetClass::Equity => "equity",
            AssetClass::Crypto => "crypto",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The input named an asset class that is neither equity nor crypto.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unsupported asset class: {0:?} (expected equity or crypto)")]
pub struct AssetClassParseError(pub String);

impl FromStr for AssetClass {
    type Err = AssetClassParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equity" | "stock" | "stocks" | "us_equity" => Ok(AssetClass::Equity),
            "crypto" => Ok(AssetClass::Crypto),
            _ => Err(AssetClassParseError(s.to_string())),
        }
    }
}
