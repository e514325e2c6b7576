//! # Session Token Manager
//!
//! Tracks whether the current bearer token is believed valid and keeps it fresh
//! with a background refresh loop.
//!
//! ```text
//! Invalid --login--> Valid(loop) --tick ok--> Valid(loop)
//!                         |
//!                         +--tick fails--> Invalid(stopped, token cleared)
//!                         +--invalidate--> Invalid(stopped, token cleared)
//! ```
//!
//! The refresh itself is a callback registered by the auth repository, so this
//! module never talks to the network directly.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::api::ApiClient;
use crate::core::error::Result;
use crate::debug::spawn_tracked;

/// Refresh interval used when the server does not send `expires_in`.
pub const DEFAULT_REFRESH_MINUTES: u64 = 15;

/// Async action run on every refresh tick.
pub type RefreshCallback = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Interval between refreshes for a token living `expires_in` seconds.
///
/// Whole minutes, rounded down, never below one minute.
pub fn refresh_interval(expires_in: Option<u64>) -> Duration {
    let minutes = match expires_in {
        Some(secs) => (secs / 60).max(1),
        None => DEFAULT_REFRESH_MINUTES,
    };
    Duration::from_secs(minutes * 60)
}

pub struct TokenManager {
    client: Arc<ApiClient>,
    valid: watch::Sender<bool>,
    callback: RwLock<Option<RefreshCallback>>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

impl TokenManager {
    pub fn new(client: Arc<ApiClient>) -> Arc<Self> {
        let (valid, _) = watch::channel(false);
        Arc::new(Self {
            client,
            valid,
            callback: RwLock::new(None),
            refresh_task: Mutex::new(None),
        })
    }

    /// Register the refresh action, replacing any previous one.
    pub fn set_refresh_callback(&self, callback: RefreshCallback) {
        *self.callback.write() = Some(callback);
    }

    /// Mark the token valid and (re)start the refresh loop.
    ///
    /// Any loop already running is aborted first, so at most one exists.
    pub fn start_auto_refresh(self: &Arc<Self>, interval: Duration) {
        self.stop_auto_refresh();
        self.mark_token_valid();

        let manager = Arc::downgrade(self);
        let handle = spawn_tracked("token_refresh", async move {
            loop {
                tokio::time::sleep(interval).await;
                let Some(manager) = manager.upgrade() else {
                    break;
                };
                if !manager.refresh_once().await {
                    break;
                }
            }
        });

        tracing::info!(interval_secs = interval.as_secs(), "Token auto-refresh started");
        *self.refresh_task.lock() = Some(handle);
    }

    /// Abort the refresh loop. No-op when none is running.
    pub fn stop_auto_refresh(&self) {
        if let Some(handle) = self.refresh_task.lock().take() {
            handle.abort();
            tracing::debug!("Token auto-refresh stopped");
        }
    }

    pub fn mark_token_valid(&self) {
        self.valid.send_replace(true);
    }

    /// Mark invalid, stop refreshing and drop the client's token.
    pub fn invalidate_token(&self) {
        self.valid.send_replace(false);
        self.stop_auto_refresh();
        self.client.clear_auth_token();
        tracing::info!("Session token invalidated");
    }

    pub fn is_token_valid(&self) -> bool {
        *self.valid.borrow()
    }

    /// Observe validity changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.valid.subscribe()
    }

    pub fn is_refresh_active(&self) -> bool {
        self.refresh_task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Run one tick. Returns `false` when the loop must end.
    async fn refresh_once(&self) -> bool {
        let callback = self.callback.read().clone();
        let Some(callback) = callback else {
            tracing::debug!("Refresh tick without callback");
            return true;
        };

        match callback().await {
            Ok(()) => {
                self.valid.send_replace(true);
                tracing::info!("Token refreshed");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, session invalidated");
                self.valid.send_replace(false);
                self.client.clear_auth_token();
                false
            }
        }
    }
}

impl Drop for TokenManager {
    fn drop(&mut self) {
        if let Some(handle) = self.refresh_task.get_mut().take() {
            handle.abort();
        }
    }
}
