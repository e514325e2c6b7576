//! # Trading Wall DTOs
//!
//! The metrics endpoints on the general API host return loosely typed JSON:
//! numbers sometimes arrive as strings and whole sections may be missing.
//! [`TimeframeMetrics::from_value`] and [`PortfolioMetrics::from_value`] parse
//! that shape field by field instead of failing the whole payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// `GET /api/v1/timeframes/metrics`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimeframeMetrics {
    pub timestamp: Option<String>,
    pub signal_generation: Option<SignalGenerationMetrics>,
    pub cache: Option<CacheMetrics>,
    pub processing: Option<ProcessingMetrics>,
    pub confluence: Option<ConfluenceMetrics>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignalGenerationMetrics {
    pub total: i64,
    pub by_timeframe_strategy: HashMap<String, i64>,
    pub avg_times: HashMap<String, f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CacheMetrics {
    pub hits: HashMap<String, i64>,
    pub misses: HashMap<String, i64>,
    pub total_operations: HashMap<String, i64>,
    pub hit_rates: HashMap<String, f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProcessingMetrics {
    pub parallel_count: i64,
    pub async_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfluenceMetrics {
    pub detections: i64,
}

impl TimeframeMetrics {
    pub fn from_value(json: &Value) -> Self {
        Self {
            timestamp: json.get("timestamp").and_then(lenient_string),
            signal_generation: json.get("signal_generation").and_then(Value::as_object).map(|obj| {
                SignalGenerationMetrics {
                    total: obj.get("total").and_then(lenient_i64).unwrap_or(0),
                    by_timeframe_strategy: int_map(obj.get("by_timeframe_strategy")),
                    avg_times: float_map(obj.get("avg_times")),
                }
            }),
            cache: json.get("cache").and_then(Value::as_object).map(|obj| CacheMetrics {
                hits: int_map(obj.get("hits")),
                misses: int_map(obj.get("misses")),
                total_operations: int_map(obj.get("total_operations")),
                hit_rates: float_map(obj.get("hit_rates")),
            }),
            processing: json.get("processing").and_then(Value::as_object).map(|obj| {
                ProcessingMetrics {
                    parallel_count: obj.get("parallel_count").and_then(lenient_i64).unwrap_or(0),
                    async_count: obj.get("async_count").and_then(lenient_i64).unwrap_or(0),
                }
            }),
            confluence: json.get("confluence").and_then(Value::as_object).map(|obj| {
                ConfluenceMetrics {
                    detections: obj.get("detections").and_then(lenient_i64).unwrap_or(0),
                }
            }),
        }
    }
}

/// `GET /api/dashboard/overview`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PortfolioMetrics {
    pub pnl: Option<f64>,
    pub exposure: Option<f64>,
    pub risk: Option<f64>,
    pub timestamp: Option<String>,
}

impl PortfolioMetrics {
    pub fn from_value(json: &Value) -> Self {
        Self {
            pnl: json.get("pnl").and_then(lenient_f64),
            exposure: json.get("exposure").and_then(lenient_f64),
            risk: json.get("risk").and_then(lenient_f64),
            timestamp: json.get("timestamp").and_then(lenient_string),
        }
    }
}

/// One entry of the trading wall ticker tape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: f64,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub timestamp: i64,
}

impl TickerPrice {
    /// Build a ticker entry, deriving the change against the previous price when known.
    pub fn new(
        symbol: impl Into<String>,
        price: f64,
        timestamp: i64,
        previous: Option<f64>,
    ) -> Self {
        let change = previous.map(|prev| price - prev);
        let change_percent = previous
            .filter(|prev| *prev != 0.0)
            .map(|prev| (price - prev) / prev * 100.0);
        Self {
            symbol: symbol.into(),
            price,
            change,
            change_percent,
            timestamp,
        }
    }
}

/// Local time and session flags for one trading centre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorldClock {
    pub city: String,
    pub timezone: String,
    /// Local wall-clock time, `HH:MM`.
    pub time: String,
    pub is_open: bool,
    pub is_pre_market: bool,
    pub is_overlap: bool,
}

fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn int_map(value: Option<&Value>) -> HashMap<String, i64> {
    entries(value)
        .map(|(k, v)| (k.clone(), lenient_i64(v).unwrap_or(0)))
        .collect()
}

fn float_map(value: Option<&Value>) -> HashMap<String, f64> {
    entries(value)
        .map(|(k, v)| (k.clone(), lenient_f64(v).unwrap_or(0.0)))
        .collect()
}

fn entries<'a>(value: Option<&'a Value>) -> impl Iterator<Item = (&'a String, &'a Value)> {
    value
        .and_then(Value::as_object)
        .map(|obj| obj.iter())
        .into_iter()
        .flatten()
}
