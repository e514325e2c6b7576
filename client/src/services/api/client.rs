//! # API Client
//!
//! Main HTTP client for backend API communication.
//!
//! One [`ApiClient`] is shared (behind an `Arc`) by every repository. It owns the
//! base URL of each backend service, the bearer token of the current session,
//! and a single pooled `reqwest::Client`.

use std::time::Instant;

use parking_lot::RwLock;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ErrorResponse;

use crate::config::{ClientConfig, ServiceUrls, UrlOverrides};
use crate::core::error::{ApiError, Result};

/// Query parameters, in the order they are appended to the URL.
pub type Query<'a> = [(&'a str, String)];

/// Backend service a request is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// General API host (dashboard and timeframe metrics)
    Api,
    Auth,
    Data,
    Portfolio,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::Api => "api",
            Service::Auth => "auth",
            Service::Data => "data",
            Service::Portfolio => "portfolio",
        }
    }
}

/// HTTP client for communicating with the FKS backend services.
///
/// All requests share the same token: setting or clearing it is immediately
/// visible to every repository holding this client.
pub struct ApiClient {
    pub(crate) client: Client,
    urls: RwLock<ServiceUrls>,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new API client from configuration.
    ///
    /// The configured request timeout is applied by reqwest to every call.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            urls: RwLock::new(config.urls.clone()),
            token: RwLock::new(None),
        })
    }

    /// Update base URLs. Only the fields set in `overrides` change.
    pub fn configure(&self, overrides: UrlOverrides) {
        let mut urls = self.urls.write();
        urls.apply(overrides);
        tracing::info!(
            api = %urls.api,
            auth = %urls.auth,
            data = %urls.data,
            portfolio = %urls.portfolio,
            "API client configured"
        );
    }

    /// Current base URL of `service`.
    pub fn base_url(&self, service: Service) -> String {
        let urls = self.urls.read();
        match service {
            Service::Api => urls.api.clone(),
            Service::Auth => urls.auth.clone(),
            Service::Data => urls.data.clone(),
            Service::Portfolio => urls.portfolio.clone(),
        }
    }

    /// Snapshot of every base URL.
    pub fn urls(&self) -> ServiceUrls {
        self.urls.read().clone()
    }

    pub fn set_auth_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    pub fn clear_auth_token(&self) {
        if self.token.write().take().is_some() {
            tracing::debug!("Auth token cleared");
        }
    }

    pub fn auth_token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// True while a token is stored. Says nothing about whether the server still accepts it.
    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Absolute URL for `endpoint` on `service`, with `query` appended.
    pub fn endpoint_url(&self, service: Service, endpoint: &str, query: &Query<'_>) -> Result<Url> {
        build_url(&self.base_url(service), endpoint, query)
    }

    /// GET `endpoint` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        service: Service,
        query: &Query<'_>,
    ) -> Result<T> {
        let url = self.endpoint_url(service, endpoint, query)?;
        self.execute(Method::GET, url, None::<&()>, true).await
    }

    /// POST `body` as JSON to `endpoint` and decode the response.
    pub async fn post<T, B>(&self, endpoint: &str, body: &B, service: Service) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(service, endpoint, &[])?;
        self.execute(Method::POST, url, Some(body), true).await
    }

    /// PUT `body` as JSON to `endpoint` and decode the response.
    pub async fn put<T, B>(&self, endpoint: &str, body: &B, service: Service) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(service, endpoint, &[])?;
        self.execute(Method::PUT, url, Some(body), true).await
    }

    /// DELETE `endpoint` and decode the response.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str, service: Service) -> Result<T> {
        let url = self.endpoint_url(service, endpoint, &[])?;
        self.execute(Method::DELETE, url, None::<&()>, true).await
    }

    /// POST with an empty body and without the bearer header.
    ///
    /// Used by logout and refresh, which the auth service identifies by other means.
    pub async fn post_anonymous<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        service: Service,
    ) -> Result<T> {
        let url = self.endpoint_url(service, endpoint, &[])?;
        self.execute(Method::POST, url, None::<&()>, false).await
    }

    async fn execute<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        with_auth: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let start = Instant::now();
        let mut request = self.client.request(method.clone(), url.clone());

        request = match body {
            Some(body) => request.json(body),
            None if method == Method::POST || method == Method::PUT => {
                request.header(CONTENT_TYPE, "application/json")
            }
            None => request,
        };

        if with_auth {
            if let Some(token) = self.auth_token() {
                request = request.bearer_auth(token);
            }
        }

        tracing::debug!(method = %method, url = %url, "Sending request");

        let response = request.send().await.map_err(|e| {
            tracing::error!(
                error = %e,
                method = %method,
                url = %url,
                duration_ms = start.elapsed().as_millis(),
                "Request network error"
            );
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;
        let duration = start.elapsed();

        if !status.is_success() {
            let message = error_message(status, &bytes);
            tracing::warn!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                error = %message,
                duration_ms = duration.as_millis(),
                "Request failed"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let result = decode_body(&bytes);
        match &result {
            Ok(_) => tracing::debug!(
                method = %method,
                url = %url,
                status = status.as_u16(),
                bytes = bytes.len(),
                duration_ms = duration.as_millis(),
                "Request completed"
            ),
            Err(e) => tracing::error!(
                error = %e,
                method = %method,
                url = %url,
                duration_ms = duration.as_millis(),
                "Response parse error"
            ),
        }
        result
    }
}

/// Join `base` and `endpoint` and append URL-encoded query pairs.
///
/// A trailing `/` on the base is dropped and a leading `/` on the endpoint is
/// ensured, so `("http://h:1/", "api/x")` and `("http://h:1", "/api/x")` agree.
pub fn build_url(base: &str, endpoint: &str, query: &Query<'_>) -> Result<Url> {
    let mut raw = String::with_capacity(base.len() + endpoint.len() + 1);
    raw.push_str(base.trim_end_matches('/'));
    if !endpoint.starts_with('/') {
        raw.push('/');
    }
    raw.push_str(endpoint);

    let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

/// Empty bodies decode as JSON `null`, so `Option<T>`, `()` and `Value` accept them.
fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let trimmed = bytes.trim_ascii();
    let payload: &[u8] = if trimmed.is_empty() { b"null" } else { trimmed };
    serde_json::from_slice(payload).map_err(ApiError::from)
}

fn error_message(status: StatusCode, bytes: &[u8]) -> String {
    if let Ok(error) = serde_json::from_slice::<ErrorResponse>(bytes) {
        return error.detail;
    }
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        text.chars().take(200).collect()
    }
}
