use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use indexmap::IndexMap;
use nonzero_ext::nonzero;
use reqwest::{Client, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;

use crate::{
    models::{asset::AssetClass, bar::BarSeries, request_params::BarsRequestParams},
    providers::{
        ApiSnafu, ClientBuildSnafu, DataProvider, InvalidApiKeySnafu, MissingEnvVarSnafu,
        ProviderError, ProviderInitError, ReqwestSnafu, ValidationSnafu,
        alpaca_rest::{
            params::construct_params,
            response::{AlpacaBar, AlpacaResponse},
        },
    },
};

const BASE_URL: &str = "https://data.alpaca.markets";
const STOCK_BARS_PATH: &str = "/v2/stocks/bars";
const CRYPTO_BARS_PATH: &str = "/v1beta3/crypto/us/bars";

pub struct AlpacaProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
    _api_key: SecretString,
    _secret_key: SecretString,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables.
    pub fn new() -> Result<Self, ProviderInitError> {
        let api_key = get_env_var("APCA_API_KEY_ID").context(MissingEnvVarSnafu)?;
        let secret_key = get_env_var("APCA_API_SECRET_KEY").context(MissingEnvVarSnafu)?;
        let api_key = SecretString::from(api_key);
        let secret_key = SecretString::from(secret_key);
        Self::with_credentials(api_key, secret_key)
    }

    /// Creates a provider from explicit credentials.
    pub fn with_credentials(
        api_key: SecretString,
        secret_key: SecretString,
    ) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "APCA-API-KEY-ID",
            header::HeaderValue::from_str(api_key.expose_secret()).context(InvalidApiKeySnafu)?,
        );
        headers.insert(
            "APCA-API-SECRET-KEY",
            header::HeaderValue::from_str(secret_key.expose_secret())
                .context(InvalidApiKeySnafu)?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        // Free data plan allows 200 requests per minute.
        let limiter = RateLimiter::direct(Quota::per_minute(nonzero!(200u32)));

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
            limiter,
            _api_key: api_key,
            _secret_key: secret_key,
        })
    }

    /// Point the provider at another host (paper/sandbox or a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn bars_url(&self, asset_class: AssetClass) -> String {
        let path = match asset_class {
            AssetClass::Equity => STOCK_BARS_PATH,
            AssetClass::Crypto => CRYPTO_BARS_PATH,
        };
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    fn name(&self) -> &'static str {
        "alpaca"
    }

    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        if let Err(e) = params.timeframe.validate() {
            return ValidationSnafu {
                message: e.to_string(),
            }
            .fail();
        }

        let url = self.bars_url(params.asset_class);
        let mut all_bars: IndexMap<String, Vec<AlpacaBar>> = IndexMap::new();
        let mut next_page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut query_params = construct_params(&params);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            self.limiter.until_ready().await;
            let response = self
                .client
                .get(&url)
                .query(&query_params)
                .send()
                .await
                .context(ReqwestSnafu)?;
            pages += 1;

            let status = response.status();
            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return ApiSnafu {
                    status: status.as_u16(),
                    message,
                }
                .fail();
            }

            let alpaca_response = response.json::<AlpacaResponse>().await.context(ReqwestSnafu)?;

            // Merge the bars from the current page into our collection.
            for (symbol, bars) in alpaca_response.bars.unwrap_or_default() {
                all_bars.entry(symbol).or_default().extend(bars);
            }

            match alpaca_response.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(
            provider = "alpaca",
            asset_class = %params.asset_class,
            pages,
            symbols = all_bars.len(),
            "fetched bars"
        );

        let asset_class = params.asset_class;
        let result = all_bars
            .into_iter()
            .map(|(symbol, alpaca_bars)| BarSeries {
                symbol,
                asset_class,
                timeframe: params.timeframe,
                bars: alpaca_bars
                    .into_iter()
                    .map(|ab| ab.into_bar(asset_class))
                    .collect(),
            })
            .collect();

        Ok(result)
    }
}
