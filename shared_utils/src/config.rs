//! Application configuration.
//!
//! [`AppConfig`] is loaded once at process start and then handed by value to
//! the components that need it. Loading order is: built-in defaults, an
//! optional TOML file, then environment overrides.
//!
//! ```toml
//! database_url = "data/bars.db"
//! fetch_timeout_secs = 20
//!
//! [trend]
//! short_window = 10
//! long_window = 50
//! trend_window = 5
//!
//! [decision]
//! buy_threshold = 20.0
//! sell_threshold = -20.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::env::{InvalidEnvVarError, lookup_env_var, parse_var};

/// Default location of the optional settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config/settings.toml";

/// Environment variable naming an alternative settings file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_FILE_PATH";

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file exists but could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`AppConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An override variable held an unparsable value.
    #[error(transparent)]
    InvalidOverride(#[from] InvalidEnvVarError),

    /// The resulting configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which upstream market-data provider to use (serde snake_case).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Alpaca market data API.
    #[default]
    Alpaca,
}

/// Moving-average windows used by the default caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrendWindows {
    /// Short SMA window.
    pub short_window: usize,
    /// Long SMA window.
    pub long_window: usize,
    /// Trailing window for the strength slope.
    pub trend_window: usize,
}

impl Default for TrendWindows {
    fn default() -> Self {
        Self {
            short_window: 10,
            long_window: 50,
            trend_window: 5,
        }
    }
}

/// Weights and thresholds for combining sentiment and technical scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecisionSettings {
    pub sentiment_weight: f64,
    pub technical_weight: f64,
    pub buy_threshold: f64,
    pub sell_threshold: f64,
}

impl Default for DecisionSettings {
    fn default() -> Self {
        Self {
            sentiment_weight: 0.5,
            technical_weight: 0.5,
            buy_threshold: 20.0,
            sell_threshold: -20.0,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// SQLite database path (a `sqlite://` prefix is accepted).
    pub database_url: String,
    /// Market-data provider.
    pub provider: ProviderId,
    /// Upper bound on a single source fetch.
    pub fetch_timeout_secs: u64,
    pub trend: TrendWindows,
    pub decision: DecisionSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "trading_bot.db".to_string(),
            provider: ProviderId::Alpaca,
            fetch_timeout_secs: 30,
            trend: TrendWindows::default(),
            decision: DecisionSettings::default(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML settings file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Full load: defaults, then the settings file (explicit path, else
    /// `CONFIG_FILE_PATH`, else [`DEFAULT_CONFIG_PATH`] when present), then
    /// process environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| lookup_env_var(CONFIG_PATH_ENV).map(PathBuf::from));

        let mut cfg = match path {
            Some(p) => Self::from_path(&p)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::from_path(default)?
                } else {
                    Self::default()
                }
            }
        };

        cfg.apply_overrides(lookup_env_var)?;
        cfg.validate()?;
        tracing::debug!(?cfg, "configuration loaded");
        Ok(cfg)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production, a map in tests).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DATABASE_URL") {
            self.database_url = v;
        }
        if let Some(v) = lookup("FETCH_TIMEOUT_SECS") {
            self.fetch_timeout_secs = parse_var("FETCH_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = lookup("SENTIMENT_WEIGHT") {
            self.decision.sentiment_weight = parse_var("SENTIMENT_WEIGHT", &v)?;
        }
        if let Some(v) = lookup("TECHNICAL_WEIGHT") {
            self.decision.technical_weight = parse_var("TECHNICAL_WEIGHT", &v)?;
        }
        if let Some(v) = lookup("BUY_THRESHOLD") {
            self.decision.buy_threshold = parse_var("BUY_THRESHOLD", &v)?;
        }
        if let Some(v) = lookup("SELL_THRESHOLD") {
            self.decision.sell_threshold = parse_var("SELL_THRESHOLD", &v)?;
        }
        Ok(())
    }

    /// Reject settings no component could work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("database_url must not be empty".into()));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_secs must be > 0".into()));
        }
        if self.decision.sell_threshold > self.decision.buy_threshold {
            return Err(ConfigError::Invalid(format!(
                "sell_threshold ({}) is above buy_threshold ({})",
                self.decision.sell_threshold, self.decision.buy_threshold
            )));
        }
        Ok(())
    }
}
