//! # Client Configuration
//!
//! Base URLs for the four backend services plus HTTP settings.
//!
//! The library never reads the environment by itself: entry points call
//! [`ClientConfig::from_env`] once at startup and hand the result to
//! [`crate::services::api::ApiClient::new`] (or to `configure`).
//!
//! ## Environment variables
//!
//! | Variable | Default |
//! |---|---|
//! | `FKS_API_URL` | `http://localhost:8001` |
//! | `FKS_AUTH_URL` | `http://localhost:8009` |
//! | `FKS_DATA_URL` | `http://localhost:8003` |
//! | `FKS_PORTFOLIO_URL` | `http://localhost:8012` |
//! | `FKS_HTTP_TIMEOUT_SECS` | `10` |
//! | `FKS_USERNAME` / `FKS_PASSWORD` | unset (no automatic login) |

use std::time::Duration;

use lib_utils::envs;
use shared::Credentials;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8009";
pub const DEFAULT_DATA_URL: &str = "http://localhost:8003";
pub const DEFAULT_PORTFOLIO_URL: &str = "http://localhost:8012";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Base URL of each backend service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    pub api: String,
    pub auth: String,
    pub data: String,
    pub portfolio: String,
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            api: DEFAULT_API_URL.to_string(),
            auth: DEFAULT_AUTH_URL.to_string(),
            data: DEFAULT_DATA_URL.to_string(),
            portfolio: DEFAULT_PORTFOLIO_URL.to_string(),
        }
    }
}

impl ServiceUrls {
    /// Overwrite each URL that `overrides` sets; leave the rest untouched.
    pub fn apply(&mut self, overrides: UrlOverrides) {
        if let Some(api) = overrides.api {
            self.api = api;
        }
        if let Some(auth) = overrides.auth {
            self.auth = auth;
        }
        if let Some(data) = overrides.data {
            self.data = data;
        }
        if let Some(portfolio) = overrides.portfolio {
            self.portfolio = portfolio;
        }
    }
}

/// Partial URL update for [`crate::services::api::ApiClient::configure`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlOverrides {
    pub api: Option<String>,
    pub auth: Option<String>,
    pub data: Option<String>,
    pub portfolio: Option<String>,
}

impl From<ServiceUrls> for UrlOverrides {
    fn from(urls: ServiceUrls) -> Self {
        Self {
            api: Some(urls.api),
            auth: Some(urls.auth),
            data: Some(urls.data),
            portfolio: Some(urls.portfolio),
        }
    }
}

/// Full client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub urls: ServiceUrls,
    /// Applied to every HTTP request by the underlying reqwest client.
    pub request_timeout: Duration,
    /// Optional credentials for unattended login (headless runner).
    pub credentials: Option<Credentials>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            urls: ServiceUrls::default(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            credentials: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| envs::get_env(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut urls = ServiceUrls::default();
        urls.apply(UrlOverrides {
            api: lookup("FKS_API_URL"),
            auth: lookup("FKS_AUTH_URL"),
            data: lookup("FKS_DATA_URL"),
            portfolio: lookup("FKS_PORTFOLIO_URL"),
        });

        let timeout_secs = lookup("FKS_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let credentials = match (lookup("FKS_USERNAME"), lookup("FKS_PASSWORD")) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        };

        Self {
            urls,
            request_timeout: Duration::from_secs(timeout_secs),
            credentials,
        }
    }
}
