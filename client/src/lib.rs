//! # FKS Client Core - Library Root
//!
//! Networking, session and presentation layer shared by the FKS trading front
//! ends. It talks to four backend services (general API, auth, data and
//! portfolio) over HTTP and to the signal stream over WebSocket.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  app           - View-models (watch channel state)      │
//! ├────────────────────────────────────────────────────────┤
//! │  core          - Service traits and ApiError           │
//! ├────────────────────────────────────────────────────────┤
//! │  services      - Repositories, ApiClient, TokenManager │
//! ├────────────────────────────────────────────────────────┤
//! │  debug         - Logging, task tracking, trace ids     │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP / WebSocket
//!          ▼
//! ┌────────────┐ ┌────────────┐ ┌────────────┐ ┌────────────┐
//! │ API :8001  │ │ Auth :8009 │ │ Data :8003 │ │ Portf.:8012│
//! └────────────┘ └────────────┘ └────────────┘ └────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fks_client::app::PortfolioViewModel;
//! use fks_client::services::api::{ApiClient, DataRepository, PortfolioRepository};
//! use fks_client::ClientConfig;
//!
//! # async fn run() -> Result<(), fks_client::ApiError> {
//! let client = Arc::new(ApiClient::new(&ClientConfig::from_env())?);
//! let vm = PortfolioViewModel::new(
//!     Arc::new(PortfolioRepository::new(client.clone())),
//!     Arc::new(DataRepository::new(client)),
//! );
//! vm.load_portfolio().await;
//! println!("{:?}", vm.state().portfolio_value);
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p fks-client
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;

pub use config::{ClientConfig, ServiceUrls, UrlOverrides};
pub use core::{ApiError, Result};
pub use services::{ApiClient, Service, TokenManager};
