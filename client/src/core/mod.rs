//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! - **[`error`]**: [`ApiError`] and the `Result<T>` alias
//! - **[`service`]**: Service traits implemented by the repositories and consumed
//!   by the view-models
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fks_client::core::service::PortfolioService;
//! use fks_client::services::api::{ApiClient, PortfolioRepository};
//! use fks_client::ClientConfig;
//!
//! let client = Arc::new(ApiClient::new(&ClientConfig::default()).unwrap());
//! let portfolio: Arc<dyn PortfolioService> = Arc::new(PortfolioRepository::new(client));
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, Result};
pub use service::{
    AuthService, DashboardService, MarketDataService, PortfolioService, SignalService,
};
