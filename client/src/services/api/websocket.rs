//! # WebSocket Client for Real-Time Signals
//!
//! Opens a WebSocket on one of the configured services and exposes the text
//! frames it receives as a [`FrameStream`].
//!
//! The stream ends when the server closes the connection. A transport error is
//! yielded once as `Err` and then the stream ends too. Binary and control frames
//! are skipped.

use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use super::client::{ApiClient, Service};
use crate::core::error::{ApiError, Result};

/// Lazily produced text frames of one WebSocket connection.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Map an HTTP base URL onto its WebSocket scheme and append `endpoint`.
///
/// `https://` becomes `wss://` and `http://` becomes `ws://`. Anything else is
/// used as given.
pub fn websocket_url(base: &str, endpoint: &str) -> String {
    let base = base.trim_end_matches('/');
    let base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };

    if endpoint.starts_with('/') {
        format!("{}{}", base, endpoint)
    } else {
        format!("{}/{}", base, endpoint)
    }
}

impl ApiClient {
    /// Open a WebSocket to `endpoint` on `service`.
    ///
    /// The bearer token, when one is stored, is sent in the handshake.
    #[tracing::instrument(skip(self), fields(service = service.name()))]
    pub async fn connect_websocket(&self, endpoint: &str, service: Service) -> Result<FrameStream> {
        let url = websocket_url(&self.base_url(service), endpoint);
        info!(url = %url, "Connecting WebSocket");

        let mut request = url.as_str().into_client_request()?;
        if let Some(token) = self.auth_token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::WebSocket(format!("Invalid auth header: {}", e)))?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        let (socket, response) = connect_async(request).await.map_err(|e| {
            warn!(url = %url, error = %e, "WebSocket connection failed");
            ApiError::from(e)
        })?;
        info!(url = %url, status = response.status().as_u16(), "WebSocket connected");

        let frames = futures_util::stream::unfold(Some(socket), |state| async move {
            let mut socket = state?;
            loop {
                match socket.next().await {
                    Some(Ok(Message::Text(text))) => return Some((Ok(text), Some(socket))),
                    Some(Ok(Message::Close(frame))) => {
                        debug!(?frame, "WebSocket closed by server");
                        return None;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket stream error");
                        return Some((Err(ApiError::from(e)), None));
                    }
                    None => return None,
                }
            }
        });

        Ok(Box::pin(frames))
    }
}
