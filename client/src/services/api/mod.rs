//! # Backend API Client Module
//!
//! HTTP and WebSocket access to the four FKS backend services.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports and documentation
//! ├── client.rs     - ApiClient: base URLs, bearer token, JSON requests
//! ├── websocket.rs  - WebSocket frames as a Stream
//! ├── auth.rs       - Login, logout, refresh, profile (auth service)
//! ├── data.rs       - Prices and candles (data service)
//! ├── portfolio.rs  - Valuation, correlations, rebalancing (portfolio service)
//! ├── signal.rs     - Signal generation and stream (portfolio service)
//! └── dashboard.rs  - Trading wall metrics (API host)
//! ```

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod data;
pub mod portfolio;
pub mod signal;
pub mod websocket;

pub use auth::AuthRepository;
pub use client::{build_url, ApiClient, Query, Service};
pub use dashboard::DashboardRepository;
pub use data::DataRepository;
pub use portfolio::PortfolioRepository;
pub use signal::SignalRepository;
pub use websocket::{websocket_url, FrameStream};
