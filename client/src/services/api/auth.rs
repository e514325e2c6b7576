//! # Authentication Endpoints
//!
//! Login, logout, token refresh and profile lookups on the auth service.
//! Login hands the session over to the [`TokenManager`], which keeps the token
//! fresh until logout or a failed refresh.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{Credentials, HealthStatus, Token, UserProfile};

use super::client::{ApiClient, Service};
use crate::core::error::Result;
use crate::core::service::AuthService;
use crate::services::session::{refresh_interval, RefreshCallback, TokenManager};

pub const LOGIN_ENDPOINT: &str = "/api/v1/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/api/v1/auth/logout";
pub const REFRESH_ENDPOINT: &str = "/api/v1/auth/refresh";
pub const PROFILE_ENDPOINT: &str = "/api/v1/auth/me";
pub const HEALTH_ENDPOINT: &str = "/health";

pub struct AuthRepository {
    client: Arc<ApiClient>,
    session: Arc<TokenManager>,
}

impl AuthRepository {
    pub fn new(client: Arc<ApiClient>, session: Arc<TokenManager>) -> Self {
        Self { client, session }
    }

    pub fn session(&self) -> &Arc<TokenManager> {
        &self.session
    }

    /// Exchange credentials for a token, store it and start auto-refresh.
    #[tracing::instrument(skip(self, password), fields(username = %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Token> {
        tracing::info!("Attempting login");
        let start = std::time::Instant::now();

        let credentials = Credentials::new(username, password);
        let token: Token = self
            .client
            .post(LOGIN_ENDPOINT, &credentials, Service::Auth)
            .await?;

        self.client.set_auth_token(token.access_token.as_str());
        self.session.set_refresh_callback(refresh_callback(self.client.clone()));
        self.session.start_auto_refresh(refresh_interval(token.expires_in));

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            expires_in = ?token.expires_in,
            "Login successful"
        );
        Ok(token)
    }

    /// Best-effort server logout. The local session is always invalidated.
    pub async fn logout(&self) {
        if let Err(e) = self
            .client
            .post_anonymous::<serde_json::Value>(LOGOUT_ENDPOINT, Service::Auth)
            .await
        {
            tracing::warn!(error = %e, "Logout request failed, clearing session anyway");
        }
        self.session.invalidate_token();
    }

    /// Fetch a new token and store it.
    pub async fn refresh_token(&self) -> Result<Token> {
        refresh_with(&self.client).await
    }

    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.client.get(PROFILE_ENDPOINT, Service::Auth, &[]).await
    }

    pub async fn get_health(&self) -> Result<HealthStatus> {
        self.client.get(HEALTH_ENDPOINT, Service::Auth, &[]).await
    }
}

async fn refresh_with(client: &ApiClient) -> Result<Token> {
    let token: Token = client.post_anonymous(REFRESH_ENDPOINT, Service::Auth).await?;
    client.set_auth_token(token.access_token.as_str());
    tracing::debug!(expires_in = ?token.expires_in, "Access token renewed");
    Ok(token)
}

/// Refresh action for the token manager. Holds only the client, so the
/// manager never keeps its own owner alive.
fn refresh_callback(client: Arc<ApiClient>) -> RefreshCallback {
    Arc::new(move || {
        let client = client.clone();
        Box::pin(async move { refresh_with(&client).await.map(|_| ()) })
    })
}

#[async_trait]
impl AuthService for AuthRepository {
    async fn login(&self, username: &str, password: &str) -> Result<Token> {
        AuthRepository::login(self, username, password).await
    }

    async fn logout(&self) {
        AuthRepository::logout(self).await
    }

    async fn refresh_token(&self) -> Result<Token> {
        AuthRepository::refresh_token(self).await
    }

    async fn get_profile(&self) -> Result<UserProfile> {
        AuthRepository::get_profile(self).await
    }

    fn invalidate_session(&self) {
        self.session.invalidate_token();
    }
}
