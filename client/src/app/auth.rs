//! # Authentication View-Model
//!
//! Login, logout and session checks for the front ends.

use std::sync::Arc;

use shared::{Credentials, UserProfile};
use tokio::sync::watch;
use tracing::Instrument;

use crate::core::error::Result;
use crate::core::service::AuthService;
use crate::debug::action_span;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user_profile: Option<UserProfile>,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct AuthViewModel {
    auth: Arc<dyn AuthService>,
    state: watch::Sender<AuthState>,
}

impl AuthViewModel {
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { auth, state }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Log in and load the user's profile.
    ///
    /// A failure at either step leaves the user logged out with no token kept.
    pub async fn login(&self, username: &str, password: &str) {
        if !Credentials::new(username, password).is_complete() {
            self.state.send_modify(|s| {
                s.error = Some("Username and password required".to_string());
            });
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let result: Result<UserProfile> = async {
            self.auth.login(username, password).await?;
            self.state.send_modify(|s| s.is_authenticated = true);
            self.auth.get_profile().await
        }
        .instrument(action_span("auth.login"))
        .await;

        match result {
            Ok(profile) => {
                tracing::info!(username = %profile.username, "User logged in");
                self.state.send_modify(|s| {
                    s.user_profile = Some(profile);
                    s.is_loading = false;
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                self.auth.invalidate_session();
                self.state.send_modify(|s| {
                    s.error = Some(format!("Login failed: {}", e));
                    s.is_authenticated = false;
                    s.user_profile = None;
                    s.is_loading = false;
                });
            }
        }
    }

    /// Log out. Always ends logged out, whatever the server says.
    pub async fn logout(&self) {
        self.state.send_modify(|s| s.is_loading = true);
        self.auth.logout().instrument(action_span("auth.logout")).await;
        self.state.send_modify(|s| {
            s.is_authenticated = false;
            s.user_profile = None;
            s.is_loading = false;
        });
    }

    pub async fn refresh_token(&self) {
        let result = self
            .auth
            .refresh_token()
            .instrument(action_span("auth.refresh"))
            .await;

        if let Err(e) = result {
            tracing::warn!(error = %e, "Manual token refresh failed");
            self.auth.invalidate_session();
            self.state.send_modify(|s| {
                s.error = Some(format!("Token refresh failed: {}", e));
                s.is_authenticated = false;
                s.user_profile = None;
            });
        }
    }

    /// Probe the session by loading the profile. Failures are silent.
    pub async fn check_authentication(&self) {
        let result = self
            .auth
            .get_profile()
            .instrument(action_span("auth.check"))
            .await;

        self.state.send_modify(|s| match result {
            Ok(profile) => {
                s.user_profile = Some(profile);
                s.is_authenticated = true;
            }
            Err(_) => {
                s.user_profile = None;
                s.is_authenticated = false;
            }
        });
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}
