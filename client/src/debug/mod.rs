//! # Debugging and Tracing Infrastructure
//!
//! Structured logging and background task tracking for the FKS client.
//!
//! ## Features
//!
//! - **File-based logging**: `logs/fks-client.log.<date>` with daily rotation
//! - **Async task tracking**: lifecycle logs and an active-task counter for the
//!   refresh, ticker, clock, metrics and WebSocket loops
//! - **Trace IDs**: one span per view-model action
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fks_client::debug::{self, LogConfig};
//!
//! let _guard = debug::init_logger(&LogConfig::from_env()).expect("logging");
//!
//! tracing::info!(
//!     endpoint = "/api/portfolio/value",
//!     duration_ms = 234,
//!     "API call completed"
//! );
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `fks_client=debug,info`)
//! - `FKS_LOG_DIR`: Log directory (default: `logs`)
//! - `FKS_LOG_STDERR`: Mirror logs to stderr (1=on)
//! - `FKS_LOG_JSON`: JSON lines instead of plain text (1=on)

pub mod config;
pub mod logger;
pub mod task_tracker;
pub mod trace_context;

pub use config::LogConfig;
pub use logger::{init as init_logger, LogInitError};
pub use task_tracker::{active_task_count, spawn_tracked};
pub use trace_context::{action_span, new_trace_id};
