//! Provider registry that maps a configured [`ProviderId`] to a concrete provider.

use std::time::Duration;

use market_data_ingestor::{
    providers::{DataProvider, ProviderInitError, alpaca_rest::AlpacaProvider},
    source::SourceClient,
};
use shared_utils::config::{AppConfig, ProviderId};

/// Build and return a boxed data provider corresponding to the supplied ProviderId.
pub fn build_provider(
    id: ProviderId,
) -> Result<Box<dyn DataProvider + Send + Sync>, ProviderInitError> {
    match id {
        ProviderId::Alpaca => {
            let p = AlpacaProvider::new()?;
            Ok(Box::new(p))
        }
    }
}

/// Source client for the configured provider and fetch timeout.
pub fn build_source_client(cfg: &AppConfig) -> Result<SourceClient, ProviderInitError> {
    let provider = build_provider(cfg.provider)?;
    Ok(SourceClient::new(
        provider,
        Duration::from_secs(cfg.fetch_timeout_secs),
    ))
}
