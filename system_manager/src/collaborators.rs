//! Interfaces the job calls into, with in-memory stand-ins.
//!
//! Real brokerage, news-sentiment and notification backends implement these
//! traits outside this crate.

use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSnapshot {
    /// Quantity held per symbol.
    pub holdings: BTreeMap<String, f64>,
    /// Cash balance.
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// An order someone may choose to place. Nothing here executes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderIntent {
    pub symbol: String,
    pub quantity: u32,
    pub side: OrderSide,
}

#[async_trait]
pub trait AccountManager: Send + Sync {
    async fn snapshot(&self) -> anyhow::Result<AccountSnapshot>;

    async fn place_order(&self, order: &OrderIntent) -> anyhow::Result<()>;
}

/// Sentiment in `[-100, 100]`, or `None` when no reading is available.
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    async fn score(&self, symbol: &str, as_of: NaiveDate) -> Option<f64>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Fixed holdings; orders are recorded, never sent anywhere.
#[derive(Debug)]
pub struct StubAccountManager {
    snapshot: AccountSnapshot,
    placed: Mutex<Vec<OrderIntent>>,
}

impl StubAccountManager {
    pub fn new(snapshot: AccountSnapshot) -> Self {
        Self {
            snapshot,
            placed: Mutex::new(Vec::new()),
        }
    }

    /// Orders received so far.
    pub fn placed(&self) -> Vec<OrderIntent> {
        self.placed
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

impl Default for StubAccountManager {
    fn default() -> Self {
        Self::new(AccountSnapshot {
            holdings: BTreeMap::from([("AAPL".to_string(), 2.0), ("BTC".to_string(), 1.0)]),
            balance: 10_000.0,
        })
    }
}

#[async_trait]
impl AccountManager for StubAccountManager {
    async fn snapshot(&self) -> anyhow::Result<AccountSnapshot> {
        Ok(self.snapshot.clone())
    }

    async fn place_order(&self, order: &OrderIntent) -> anyhow::Result<()> {
        tracing::info!(
            symbol = %order.symbol,
            quantity = order.quantity,
            side = ?order.side,
            "order recorded (not executed)"
        );
        self.placed
            .lock()
            .map_err(|_| anyhow::anyhow!("order log poisoned"))?
            .push(order.clone());
        Ok(())
    }
}

/// Always reports a neutral reading of 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeutralSentiment;

#[async_trait]
impl SentimentScorer for NeutralSentiment {
    async fn score(&self, _symbol: &str, _as_of: NaiveDate) -> Option<f64> {
        Some(0.0)
    }
}

/// Sends notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(text = message, "notification");
    }
}
