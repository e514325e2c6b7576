//! # Utilities Library
//!
//! Shared utility functions for environment variables and time.

pub mod envs;
pub mod time;

// Re-export commonly used functions
pub use envs::{get_env, get_env_bool, get_env_or};
pub use time::{format_time, now_utc};
