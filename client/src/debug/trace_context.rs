//! Trace IDs for correlating the log lines of one user action
//!
//! Every view-model action runs inside an [`action_span`] carrying a fresh
//! `trace_id`, so the requests it makes and the errors it records can be
//! grouped in the log file even when actions interleave on the runtime.

use tracing::Span;
use uuid::Uuid;

/// Generate a new trace ID
pub fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span for one user-initiated action.
///
/// ```rust,no_run
/// # async fn demo() {
/// use tracing::Instrument;
/// use fks_client::debug::action_span;
///
/// async { tracing::info!("loading") }
///     .instrument(action_span("portfolio.load"))
///     .await;
/// # }
/// ```
pub fn action_span(action: &'static str) -> Span {
    tracing::info_span!("action", action, trace_id = %new_trace_id())
}
