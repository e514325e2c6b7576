use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A generated trading signal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signal {
    pub symbol: String,
    /// "BUY", "SELL", "HOLD" and similar; casing is not normalised.
    pub signal_type: String,
    pub category: String,
    pub entry_price: f64,
    pub take_profit: f64,
    pub stop_loss: f64,
    pub take_profit_pct: f64,
    pub stop_loss_pct: f64,
    pub risk_reward_ratio: f64,
    pub position_size_pct: f64,
    pub strength: String,
    /// Expected in `[0, 1]`, not clamped.
    pub confidence: f64,
    pub timestamp: String,
    pub is_valid: bool,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Signal {
    pub fn is_type(&self, signal_type: &str) -> bool {
        self.signal_type.eq_ignore_ascii_case(signal_type)
    }

    pub fn has_strength(&self, strength: &str) -> bool {
        self.strength.eq_ignore_ascii_case(strength)
    }
}

/// Signal category accepted by `GET /api/signals/generate`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignalCategory {
    #[default]
    Swing,
    Scalp,
    Position,
    Day,
    Crypto,
    Forex,
    Stocks,
    Futures,
    Bitcoin,
}

impl SignalCategory {
    pub fn all() -> &'static [SignalCategory] {
        &[
            SignalCategory::Swing,
            SignalCategory::Scalp,
            SignalCategory::Position,
            SignalCategory::Day,
            SignalCategory::Crypto,
            SignalCategory::Forex,
            SignalCategory::Stocks,
            SignalCategory::Futures,
            SignalCategory::Bitcoin,
        ]
    }

    /// Query-string value
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::Swing => "swing",
            SignalCategory::Scalp => "scalp",
            SignalCategory::Position => "position",
            SignalCategory::Day => "day",
            SignalCategory::Crypto => "crypto",
            SignalCategory::Forex => "forex",
            SignalCategory::Stocks => "stocks",
            SignalCategory::Futures => "futures",
            SignalCategory::Bitcoin => "bitcoin",
        }
    }
}

impl std::fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SignalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SignalCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown signal category: {}", s))
    }
}

/// Aggregate counts from `GET /api/signals/summary`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalSummary {
    pub total_signals: u32,
    #[serde(default)]
    pub by_category: HashMap<String, u32>,
    #[serde(default)]
    pub by_strength: HashMap<String, u32>,
    pub timestamp: String,
}
