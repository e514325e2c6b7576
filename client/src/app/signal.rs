//! # Signal View-Model
//!
//! Loads generated signals and the signal summary, and offers the filtered views
//! used by the signal matrix.

use std::sync::Arc;

use shared::{Signal, SignalCategory, SignalSummary};
use tokio::sync::watch;
use tracing::Instrument;

use crate::core::error::Result;
use crate::core::service::SignalService;
use crate::debug::action_span;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalState {
    pub signals: Vec<Signal>,
    pub signal_summary: Option<SignalSummary>,
    pub selected_category: SignalCategory,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct SignalViewModel {
    signals: Arc<dyn SignalService>,
    state: watch::Sender<SignalState>,
}

impl SignalViewModel {
    pub fn new(signals: Arc<dyn SignalService>) -> Self {
        let (state, _) = watch::channel(SignalState::default());
        Self { signals, state }
    }

    pub fn state(&self) -> SignalState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SignalState> {
        self.state.subscribe()
    }

    /// Load signals for `category` (the selected one when `None`) and the summary.
    pub async fn load_signals(
        &self,
        category: Option<SignalCategory>,
        symbols: Option<&str>,
        ai_enhanced: bool,
    ) {
        let category = category.unwrap_or_else(|| self.state.borrow().selected_category);
        self.begin(category);

        let result = async {
            let signals = self
                .signals
                .generate_signals(category, symbols, ai_enhanced)
                .await?;
            self.finish_load(signals).await
        }
        .instrument(action_span("signals.load"))
        .await;

        self.end(result, "Failed to load signals");
    }

    /// Load AI-enhanced Bitcoin signals and the summary.
    pub async fn load_bitcoin_signals(&self) {
        self.begin(SignalCategory::Bitcoin);

        let result = async {
            let signals = self.signals.get_bitcoin_signals(true).await?;
            self.finish_load(signals).await
        }
        .instrument(action_span("signals.load_bitcoin"))
        .await;

        self.end(result, "Failed to load Bitcoin signals");
    }

    /// Reload the selected category.
    pub async fn refresh(&self) {
        self.load_signals(None, None, false).await
    }

    fn begin(&self, category: SignalCategory) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
            s.selected_category = category;
        });
    }

    async fn finish_load(&self, signals: Vec<Signal>) -> Result<()> {
        tracing::debug!(count = signals.len(), "Signals loaded");
        self.state.send_modify(|s| s.signals = signals);
        let summary = self.signals.get_signal_summary().await?;
        self.state.send_modify(|s| s.signal_summary = Some(summary));
        Ok(())
    }

    fn end(&self, result: Result<()>, context: &str) {
        self.state.send_modify(|s| {
            if let Err(e) = result {
                tracing::warn!(error = %e, "{}", context);
                s.error = Some(format!("{}: {}", context, e));
            }
            s.is_loading = false;
        });
    }

    fn filtered(&self, keep: impl Fn(&Signal) -> bool) -> Vec<Signal> {
        self.state
            .borrow()
            .signals
            .iter()
            .filter(|&s| keep(s))
            .cloned()
            .collect()
    }

    /// Signals whose type matches `signal_type`, ignoring case.
    pub fn signals_by_type(&self, signal_type: &str) -> Vec<Signal> {
        self.filtered(|s| s.is_type(signal_type))
    }

    pub fn buy_signals(&self) -> Vec<Signal> {
        self.signals_by_type("BUY")
    }

    pub fn sell_signals(&self) -> Vec<Signal> {
        self.signals_by_type("SELL")
    }

    /// Signals whose strength matches `strength`, ignoring case.
    pub fn signals_by_strength(&self, strength: &str) -> Vec<Signal> {
        self.filtered(|s| s.has_strength(strength))
    }

    pub fn strong_signals(&self) -> Vec<Signal> {
        self.signals_by_strength("strong")
    }

    pub fn high_confidence_signals(&self, min_confidence: f64) -> Vec<Signal> {
        self.filtered(|s| s.confidence >= min_confidence)
    }

    /// Mean confidence of the loaded signals; `0.0` when there are none.
    pub fn average_confidence(&self) -> f64 {
        let state = self.state.borrow();
        if state.signals.is_empty() {
            return 0.0;
        }
        state.signals.iter().map(|s| s.confidence).sum::<f64>() / state.signals.len() as f64
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::fakes::{self, signal, FakeSignals};

    fn setup(signals: Vec<Signal>) -> (Arc<FakeSignals>, SignalViewModel) {
        let service = Arc::new(FakeSignals::default());
        *service.signals.lock() = Ok(signals);
        *service.summary.lock() = Ok(fakes::summary(3));
        let vm = SignalViewModel::new(service.clone());
        (service, vm)
    }

    fn mixed() -> Vec<Signal> {
        vec![
            signal("BTC/USD", "Buy", "STRONG", 0.9),
            signal("ETH/USD", "SELL", "weak", 0.4),
            signal("SOL/USD", "buy", "Strong", 0.8),
        ]
    }

    #[tokio::test]
    async fn test_load_signals_uses_selected_category() {
        let (service, vm) = setup(mixed());

        vm.load_signals(Some(SignalCategory::Scalp), None, false).await;
        assert_eq!(*service.last_category.lock(), Some(SignalCategory::Scalp));

        vm.refresh().await;
        assert_eq!(*service.last_category.lock(), Some(SignalCategory::Scalp));

        let state = vm.state();
        assert_eq!(state.signals.len(), 3);
        assert_eq!(state.signal_summary.unwrap().total_signals, 3);
        assert_eq!(state.selected_category, SignalCategory::Scalp);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_filters_ignore_case() {
        let (_, vm) = setup(mixed());
        vm.load_signals(None, None, false).await;

        assert_eq!(vm.signals_by_type("buy").len(), 2);
        assert_eq!(vm.buy_signals().len(), 2);
        assert_eq!(vm.sell_signals().len(), 1);
        assert_eq!(vm.strong_signals().len(), 2);
        assert_eq!(vm.signals_by_strength("WEAK").len(), 1);
        assert_eq!(vm.high_confidence_signals(0.8).len(), 2);
        assert!((vm.average_confidence() - 0.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_average_confidence_empty() {
        let (_, vm) = setup(Vec::new());
        assert_eq!(vm.average_confidence(), 0.0);
        vm.load_signals(None, None, false).await;
        assert_eq!(vm.average_confidence(), 0.0);
    }

    #[tokio::test]
    async fn test_bitcoin_failure_sets_error() {
        let (service, vm) = setup(mixed());
        vm.load_signals(None, None, false).await;
        *service.signals.lock() = Err(fakes::network_error());

        vm.load_bitcoin_signals().await;

        let state = vm.state();
        assert_eq!(state.selected_category, SignalCategory::Bitcoin);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to load Bitcoin signals: Network error: connection refused")
        );
        assert_eq!(state.signals.len(), 3);
        assert!(!state.is_loading);
    }
}
