use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Portfolio valuation from `GET /api/portfolio/value`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioValue {
    pub total_btc: f64,
    #[serde(default)]
    pub total_usd: Option<f64>,
    #[serde(default)]
    pub holdings_btc: HashMap<String, f64>,
    /// Fraction of the portfolio held in BTC, expected in `[0, 1]`.
    pub btc_allocation: f64,
    pub timestamp: String,
}

/// Asset price row from `GET /api/assets/prices`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetPrice {
    pub symbol: String,
    #[serde(default)]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub price_btc: Option<f64>,
    #[serde(default)]
    pub change_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

impl AssetPrice {
    /// Stand-in BTC row used when the portfolio service has no BTC price.
    pub fn btc_placeholder() -> Self {
        Self {
            symbol: "BTC".to_string(),
            price_usd: Some(0.0),
            price_btc: Some(1.0),
            change_24h: None,
            market_cap: None,
        }
    }
}

/// Correlation to BTC from `GET /api/portfolio/correlations`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Correlation {
    pub symbol: String,
    pub correlation_to_btc: f64,
    #[serde(default)]
    pub timeframe: Option<String>,
}

/// Single buy/sell step of a rebalancing plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalancingAction {
    pub symbol: String,
    /// "buy" or "sell"
    pub action: String,
    pub amount: f64,
    pub current_amount: f64,
}

/// Rebalancing plan from `GET /api/portfolio/rebalancing`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RebalancingPlan {
    pub target_btc_allocation: f64,
    pub current_btc_allocation: f64,
    #[serde(default)]
    pub actions: Vec<RebalancingAction>,
}

impl RebalancingPlan {
    /// No actions means the portfolio already sits at the target.
    pub fn is_balanced(&self) -> bool {
        self.actions.is_empty()
    }
}
