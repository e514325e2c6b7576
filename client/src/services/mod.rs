//! # Services Module
//!
//! Backend access for the FKS trading client.
//!
//! ```text
//! services/
//! ├── api/        - ApiClient and one repository per backend concern
//! └── session.rs  - TokenManager (token validity + auto-refresh loop)
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        View-models                           │
//! │   Auth   Portfolio   Signal   TradingWall   WebSocket        │
//! └───────┬───────────┬─────────┬──────────────┬─────────────────┘
//!         │  Arc<dyn Service trait>            │
//! ┌───────▼───────────▼─────────▼──────────────▼─────────────────┐
//! │  AuthRepository ─── TokenManager                             │
//! │  DataRepository  PortfolioRepository  SignalRepository       │
//! │  DashboardRepository                                         │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │ Arc<ApiClient> (shared token)
//!         ┌─────────────┬─────┴───────┬─────────────────┐
//!         ▼             ▼             ▼                 ▼
//!     api :8001     auth :8009    data :8003     portfolio :8012
//! ```
//!
//! The client, token manager and repositories are plain values wired together
//! by the caller; there is no process-wide instance.

pub mod api;
pub mod session;

pub use api::{
    ApiClient, AuthRepository, DashboardRepository, DataRepository, FrameStream,
    PortfolioRepository, Service, SignalRepository,
};
pub use session::{refresh_interval, RefreshCallback, TokenManager, DEFAULT_REFRESH_MINUTES};
