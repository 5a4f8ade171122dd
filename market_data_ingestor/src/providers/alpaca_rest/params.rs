use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::models::{
    asset::AssetClass,
    request_params::{BarsRequestParams, ProviderParams},
    timeframe::{TimeFrame, TimeFrameUnit},
};

/// Specifies the corporate action adjustment for stock data.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    #[default]
    Raw,
    Split,
    Dividend,
    All,
}

/// Specifies the source feed for stock data.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Feed {
    #[default]
    Sip,
    Iex,
    Otc,
}

/// Specifies the sort order for the bars.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

/// Alpaca-specific parameters for a bars request.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct AlpacaBarsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<Adjustment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed: Option<Feed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

fn adjustment_str(a: &Adjustment) -> &'static str {
    match a {
        Adjustment::Raw => "raw",
        Adjustment::Split => "split",
        Adjustment::Dividend => "dividend",
        Adjustment::All => "all",
    }
}

fn feed_str(f: &Feed) -> &'static str {
    match f {
        Feed::Sip => "sip",
        Feed::Iex => "iex",
        Feed::Otc => "otc",
    }
}

fn sort_str(s: &Sort) -> &'static str {
    match s {
        Sort::Asc => "asc",
        Sort::Desc => "desc",
    }
}

/// Alpaca's timeframe notation, e.g. `1Day`.
pub fn timeframe_param(tf: &TimeFrame) -> String {
    let unit = match tf.unit {
        TimeFrameUnit::Day => "Day",
    };
    format!("{}{}", tf.amount, unit)
}

/// Build the query string for one page (without `page_token`).
///
/// Stock-only knobs (`adjustment`, `feed`, `currency`) are dropped for crypto.
pub fn construct_params(params: &BarsRequestParams) -> Vec<(String, String)> {
    let mut q = vec![
        ("symbols".to_string(), params.symbols.join(",")),
        ("timeframe".to_string(), timeframe_param(&params.timeframe)),
        (
            "start".to_string(),
            params.start.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        (
            "end".to_string(),
            params.end.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
    ];

    if let ProviderParams::Alpaca(extra) = &params.provider_specific {
        if params.asset_class == AssetClass::Equity {
            if let Some(a) = &extra.adjustment {
                q.push(("adjustment".to_string(), adjustment_str(a).to_string()));
            }
            if let Some(f) = &extra.feed {
                q.push(("feed".to_string(), feed_str(f).to_string()));
            }
            if let Some(c) = &extra.currency {
                q.push(("currency".to_string(), c.clone()));
            }
        }
        if let Some(limit) = extra.limit {
            q.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(s) = &extra.sort {
            q.push(("sort".to_string(), sort_str(s).to_string()));
        }
    }
    q
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn get<'a>(q: &'a [(String, String)], key: &str) -> Option<&'a str> {
        q.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn daily_stock_query() {
        let mut p = BarsRequestParams::daily("AAPL", AssetClass::Equity, jan(1), jan(10));
        p.provider_specific = ProviderParams::Alpaca(AlpacaBarsParams {
            adjustment: Some(Adjustment::All),
            feed: Some(Feed::Iex),
            limit: Some(1000),
            ..Default::default()
        });

        let q = construct_params(&p);
        assert_eq!(get(&q, "symbols"), Some("AAPL"));
        assert_eq!(get(&q, "timeframe"), Some("1Day"));
        assert_eq!(get(&q, "start"), Some("2024-01-01T00:00:00Z"));
        assert_eq!(get(&q, "end"), Some("2024-01-11T00:00:00Z"));
        assert_eq!(get(&q, "adjustment"), Some("all"));
        assert_eq!(get(&q, "feed"), Some("iex"));
        assert_eq!(get(&q, "limit"), Some("1000"));
        assert_eq!(get(&q, "sort"), None);
    }

    #[test]
    fn crypto_query_drops_stock_only_knobs() {
        let mut p = BarsRequestParams::daily("BTC/USD", AssetClass::Crypto, jan(1), jan(2));
        p.provider_specific = ProviderParams::Alpaca(AlpacaBarsParams {
            feed: Some(Feed::Sip),
            sort: Some(Sort::Desc),
            ..Default::default()
        });

        let q = construct_params(&p);
        assert_eq!(get(&q, "symbols"), Some("BTC/USD"));
        assert_eq!(get(&q, "feed"), None);
        assert_eq!(get(&q, "sort"), Some("desc"));
    }

    #[test]
    fn timeframe_notation() {
        assert_eq!(timeframe_param(&TimeFrame::day()), "1Day");
    }
}
