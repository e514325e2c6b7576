//! # Data Transfer Objects (DTOs)
//!
//! All data structures exchanged with the FKS backend services.
//!
//! ## Module Organization
//!
//! - [`auth`] - Credentials, tokens and user profiles (auth service)
//! - [`market`] - Prices and OHLCV candles (data service)
//! - [`signal`] - Signal generation results (portfolio service)
//! - [`portfolio`] - Portfolio valuation and rebalancing (portfolio service)
//! - [`dashboard`] - Trading wall metrics (general API host)
//! - [`health`] - `/health` responses (every service)
//! - [`tasks`] - Gamification tasks and progress
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/v1/auth/login
//! Content-Type: application/json
//!
//! { "username": "alice", "password": "hunter2" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "access_token": "eyJhbGciOiJIUzI1NiIs...", "token_type": "bearer", "expires_in": 1800 }
//! ```

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod market;
pub mod portfolio;
pub mod signal;
pub mod tasks;

pub use auth::*;
pub use dashboard::*;
pub use health::*;
pub use market::*;
pub use portfolio::*;
pub use signal::*;
pub use tasks::*;
