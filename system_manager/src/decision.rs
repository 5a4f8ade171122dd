//! Combine sentiment and technical scores into a trade decision.

use serde::Serialize;
use shared_utils::config::DecisionSettings;

use crate::collaborators::{OrderIntent, OrderSide};

/// Shares per buy/sell decision.
pub const DEFAULT_TRADE_QUANTITY: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub symbol: String,
    pub action: Action,
    /// 0 for `Hold`.
    pub quantity: u32,
    /// `sentiment_weight * sentiment + technical_weight * technical`.
    pub combined_score: f64,
}

impl Decision {
    /// The order this decision implies, if any.
    pub fn order(&self) -> Option<OrderIntent> {
        let side = match self.action {
            Action::Buy => OrderSide::Buy,
            Action::Sell => OrderSide::Sell,
            Action::Hold => return None,
        };
        Some(OrderIntent {
            symbol: self.symbol.clone(),
            quantity: self.quantity,
            side,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DecisionMaker {
    settings: DecisionSettings,
}

impl DecisionMaker {
    pub fn new(settings: DecisionSettings) -> Self {
        Self { settings }
    }

    /// Buy at or above `buy_threshold`, sell at or below `sell_threshold`,
    /// hold otherwise. A missing sentiment reading contributes 0.
    pub fn decide(&self, symbol: &str, sentiment: Option<f64>, technical: i32) -> Decision {
        let s = &self.settings;
        let combined = s.sentiment_weight * sentiment.unwrap_or(0.0)
            + s.technical_weight * f64::from(technical);

        let (action, quantity) = if combined >= s.buy_threshold {
            (Action::Buy, DEFAULT_TRADE_QUANTITY)
        } else if combined <= s.sell_threshold {
            (Action::Sell, DEFAULT_TRADE_QUANTITY)
        } else {
            (Action::Hold, 0)
        };

        tracing::info!(
            symbol,
            ?sentiment,
            technical,
            combined,
            ?action,
            "decision"
        );
        Decision {
            symbol: symbol.to_string(),
            action,
            quantity,
            combined_score: combined,
        }
    }
}
