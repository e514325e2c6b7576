//! # View-Models
//!
//! Presentation state for the front ends. Each view-model owns a
//! [`tokio::sync::watch`] channel: the UI reads the latest snapshot with
//! `state()` or follows changes through `subscribe()`.
//!
//! ```text
//! ┌──────────────────────┐   watch::Receiver   ┌──────────────┐
//! │  *ViewModel          │ ──────────────────▶ │  UI / runner │
//! │  state: watch::Sender│                     └──────────────┘
//! └──────────┬───────────┘
//!            │ Arc<dyn *Service>
//! ┌──────────▼───────────┐
//! │  services::api repos │
//! └──────────────────────┘
//! ```
//!
//! Errors never escape a view-model. They end up as a human readable message
//! in the state's `error` field.
//!
//! - [`auth`]: login, logout, token refresh
//! - [`portfolio`]: valuation, prices, correlations, rebalancing
//! - [`signal`]: generated signals and filters
//! - [`trading_wall`]: clocks, ticker tape, metrics loops
//! - [`websocket`]: live signal stream

pub mod auth;
pub mod portfolio;
pub mod signal;
pub mod trading_wall;
pub mod websocket;

#[cfg(test)]
pub(crate) mod fakes;

pub use auth::{AuthState, AuthViewModel};
pub use portfolio::{PortfolioState, PortfolioViewModel};
pub use signal::{SignalState, SignalViewModel};
pub use trading_wall::{
    world_clocks, TradingWallConfig, TradingWallState, TradingWallViewModel, TICKER_SYMBOLS,
};
pub use websocket::{WebSocketState, WebSocketViewModel, MAX_SIGNAL_UPDATES};
