//! # Signal Endpoints
//!
//! Signal generation, summaries and the real-time signal stream, all served by
//! the portfolio service.
//!
//! The repository remembers the last list returned by
//! [`SignalRepository::generate_signals`]; [`SignalRepository::strong_signals`]
//! and [`SignalRepository::high_confidence_signals`] filter that list without
//! another request.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::{Signal, SignalCategory, SignalSummary};

use super::client::{ApiClient, Service};
use super::websocket::FrameStream;
use crate::core::error::Result;
use crate::core::service::SignalService;

pub const GENERATE_ENDPOINT: &str = "/api/signals/generate";
pub const SUMMARY_ENDPOINT: &str = "/api/signals/summary";
pub const STREAM_ENDPOINT: &str = "/api/signals/stream";

/// Symbols requested by [`SignalRepository::get_bitcoin_signals`].
pub const BITCOIN_SYMBOLS: &str = "BTC/USD,BTC/USDT";

pub struct SignalRepository {
    client: Arc<ApiClient>,
    last_signals: RwLock<Vec<Signal>>,
}

impl SignalRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            last_signals: RwLock::new(Vec::new()),
        }
    }

    #[tracing::instrument(skip(self), fields(category = %category))]
    pub async fn generate_signals(
        &self,
        category: SignalCategory,
        symbols: Option<&str>,
        ai_enhanced: bool,
    ) -> Result<Vec<Signal>> {
        let mut query = vec![("category", category.as_str().to_string())];
        if let Some(symbols) = symbols {
            query.push(("symbols", symbols.to_string()));
        }
        query.push(("ai_enhanced", ai_enhanced.to_string()));

        let signals: Vec<Signal> = self
            .client
            .get(GENERATE_ENDPOINT, Service::Portfolio, &query)
            .await?;

        tracing::debug!(count = signals.len(), "Signals generated");
        *self.last_signals.write() = signals.clone();
        Ok(signals)
    }

    pub async fn get_bitcoin_signals(&self, ai_enhanced: bool) -> Result<Vec<Signal>> {
        self.generate_signals(SignalCategory::Bitcoin, Some(BITCOIN_SYMBOLS), ai_enhanced)
            .await
    }

    pub async fn get_signal_summary(&self) -> Result<SignalSummary> {
        self.client.get(SUMMARY_ENDPOINT, Service::Portfolio, &[]).await
    }

    /// Open the signal WebSocket. Reconnecting is up to the caller.
    pub async fn connect_signal_stream(&self) -> Result<FrameStream> {
        self.client
            .connect_websocket(STREAM_ENDPOINT, Service::Portfolio)
            .await
    }

    /// Signals from the last fetch
    pub fn last_signals(&self) -> Vec<Signal> {
        self.last_signals.read().clone()
    }

    /// `strong` signals from the last fetch, case-insensitive.
    pub fn strong_signals(&self) -> Vec<Signal> {
        self.last_signals
            .read()
            .iter()
            .filter(|s| s.has_strength("strong"))
            .cloned()
            .collect()
    }

    /// Signals from the last fetch with `confidence >= min_confidence`.
    pub fn high_confidence_signals(&self, min_confidence: f64) -> Vec<Signal> {
        self.last_signals
            .read()
            .iter()
            .filter(|s| s.confidence >= min_confidence)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SignalService for SignalRepository {
    async fn generate_signals(
        &self,
        category: SignalCategory,
        symbols: Option<&str>,
        ai_enhanced: bool,
    ) -> Result<Vec<Signal>> {
        SignalRepository::generate_signals(self, category, symbols, ai_enhanced).await
    }

    async fn get_bitcoin_signals(&self, ai_enhanced: bool) -> Result<Vec<Signal>> {
        SignalRepository::get_bitcoin_signals(self, ai_enhanced).await
    }

    async fn get_signal_summary(&self) -> Result<SignalSummary> {
        SignalRepository::get_signal_summary(self).await
    }

    async fn connect_signal_stream(&self) -> Result<FrameStream> {
        SignalRepository::connect_signal_stream(self).await
    }
}
