//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the FKS client core and the backend
//! services (auth, data, portfolio and the general API host). All DTOs use JSON
//! serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login, token and user profile DTOs
//!   - **[`dto::market`]**: Price quotes and OHLCV candles
//!   - **[`dto::signal`]**: Trading signals and signal summaries
//!   - **[`dto::portfolio`]**: Portfolio value, asset prices, correlations, rebalancing
//!   - **[`dto::dashboard`]**: Trading wall metrics, ticker prices and world clocks
//!   - **[`dto::health`]**: Service health checks
//!   - **[`dto::tasks`]**: Gamification tasks and user progress
//! - **[`utils`]**: Display formatting helpers
//!
//! ## Wire Format
//!
//! The backend is lenient about the shape of its payloads, so the DTOs are too:
//! - Field names are **snake_case** on both sides, matching the backend models
//! - Unknown keys are ignored (serde default behaviour)
//! - Fields the backend may omit carry `#[serde(default)]`
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::market::PriceQuote;
//!
//! let json = r#"{"symbol":"BTC/USD","price":64000.5,"timestamp":1700000000,"provider":"binance","extra":1}"#;
//! let quote: PriceQuote = serde_json::from_str(json).unwrap();
//! assert!(!quote.cached);
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
