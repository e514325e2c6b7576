//! # Signal Stream View-Model
//!
//! Listens to the live signal WebSocket and keeps the most recent updates.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use futures_util::StreamExt;
use parking_lot::Mutex;
use shared::Signal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::core::service::SignalService;
use crate::debug::{action_span, spawn_tracked};

/// Updates kept in [`WebSocketState::signal_updates`]; the oldest are dropped first.
pub const MAX_SIGNAL_UPDATES: usize = 50;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebSocketState {
    pub is_connected: bool,
    pub latest_signal: Option<Signal>,
    pub signal_updates: VecDeque<Signal>,
    pub error: Option<String>,
}

impl WebSocketState {
    fn push(&mut self, signal: Signal) {
        if self.signal_updates.len() == MAX_SIGNAL_UPDATES {
            self.signal_updates.pop_front();
        }
        self.signal_updates.push_back(signal.clone());
        self.latest_signal = Some(signal);
    }
}

pub struct WebSocketViewModel {
    signals: Arc<dyn SignalService>,
    state: watch::Sender<WebSocketState>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl WebSocketViewModel {
    pub fn new(signals: Arc<dyn SignalService>) -> Arc<Self> {
        let (state, _) = watch::channel(WebSocketState::default());
        Arc::new(Self {
            signals,
            state,
            task: Mutex::new(None),
        })
    }

    pub fn state(&self) -> WebSocketState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WebSocketState> {
        self.state.subscribe()
    }

    /// Open the signal stream in the background. No-op while connected.
    ///
    /// The state reads as connected from this call on; a failed connect or a
    /// closed stream flips it back.
    pub fn connect(self: &Arc<Self>) {
        let mut task = self.task.lock();
        if self.state.borrow().is_connected {
            return;
        }
        if let Some(handle) = task.take() {
            handle.abort();
        }

        self.state.send_modify(|s| {
            s.is_connected = true;
            s.error = None;
        });

        let vm = Arc::downgrade(self);
        let signals = self.signals.clone();
        *task = Some(spawn_tracked(
            "signal_stream",
            listen(vm, signals).instrument(action_span("signals.stream")),
        ));
    }

    /// Drop the stream and reset the connection state.
    pub fn disconnect(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
            tracing::info!("Signal stream disconnected");
        }
        self.state.send_modify(|s| {
            s.is_connected = false;
            s.error = None;
        });
    }

    pub fn clear_updates(&self) {
        self.state.send_modify(|s| {
            s.signal_updates.clear();
            s.latest_signal = None;
        });
    }

    pub fn update_count(&self) -> usize {
        self.state.borrow().signal_updates.len()
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().is_connected
    }
}

impl Drop for WebSocketViewModel {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}

fn with_state(vm: &Weak<WebSocketViewModel>, f: impl FnOnce(&mut WebSocketState)) -> bool {
    match vm.upgrade() {
        Some(vm) => {
            vm.state.send_modify(f);
            true
        }
        None => false,
    }
}

async fn listen(vm: Weak<WebSocketViewModel>, signals: Arc<dyn SignalService>) {
    let mut stream = match signals.connect_signal_stream().await {
        Ok(stream) => stream,
        Err(e) => {
            tracing::warn!(error = %e, "Signal stream connection failed");
            with_state(&vm, |s| {
                s.is_connected = false;
                s.error = Some(format!("Connection failed: {}", e));
            });
            return;
        }
    };
    tracing::info!("Signal stream connected");

    while let Some(frame) = stream.next().await {
        let alive = match frame {
            Ok(text) => match serde_json::from_str::<Signal>(&text) {
                Ok(signal) => {
                    tracing::debug!(symbol = %signal.symbol, "Signal update");
                    with_state(&vm, |s| s.push(signal))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Unparseable signal frame");
                    with_state(&vm, |s| s.error = Some(format!("Failed to parse: {}", e)))
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Signal stream error");
                with_state(&vm, |s| {
                    s.is_connected = false;
                    s.error = Some(format!("WebSocket error: {}", e));
                });
                return;
            }
        };
        if !alive {
            return;
        }
    }

    tracing::info!("Signal stream closed");
    with_state(&vm, |s| s.is_connected = false);
}
