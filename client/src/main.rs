//! # FKS Client - Headless Runner
//!
//! Runs the client core without a UI: logs in when `FKS_USERNAME` and
//! `FKS_PASSWORD` are set, drives the trading wall and logs its state until
//! Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use fks_client::app::{AuthViewModel, TradingWallState, TradingWallViewModel};
use fks_client::debug::{self, LogConfig};
use fks_client::services::api::{AuthRepository, DashboardRepository, DataRepository};
use fks_client::{ApiClient, ClientConfig, TokenManager};
use shared::utils::{format_percent, format_usd};

const REPORT_INTERVAL: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard =
        debug::init_logger(&LogConfig::from_env()).context("failed to initialise logging")?;

    let config = ClientConfig::from_env();
    tracing::info!(urls = ?config.urls, "Starting FKS client");

    let client = Arc::new(ApiClient::new(&config).context("failed to build HTTP client")?);
    let session = TokenManager::new(client.clone());
    let auth = AuthViewModel::new(Arc::new(AuthRepository::new(client.clone(), session.clone())));

    if let Some(credentials) = &config.credentials {
        auth.login(&credentials.username, &credentials.password).await;
        let state = auth.state();
        match state.error {
            Some(error) => tracing::warn!(%error, "Continuing without a session"),
            None => tracing::info!(refresh_active = session.is_refresh_active(), "Session started"),
        }
    }

    let wall = TradingWallViewModel::new(
        Arc::new(DataRepository::new(client.clone())),
        Arc::new(DashboardRepository::new(client.clone())),
    );
    wall.start();

    let mut report = tokio::time::interval(REPORT_INTERVAL);
    loop {
        tokio::select! {
            _ = report.tick() => log_wall(&wall.state()),
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    tracing::info!("Shutting down");
    wall.stop();
    if auth.state().is_authenticated {
        auth.logout().await;
    }
    Ok(())
}

fn log_wall(state: &TradingWallState) {
    let open: Vec<&str> = state
        .world_clocks
        .iter()
        .filter(|c| c.is_open)
        .map(|c| c.city.as_str())
        .collect();
    tracing::info!(
        status = %state.connection_status,
        updated = state.last_updated.as_deref().unwrap_or("-"),
        open_markets = ?open,
        "Trading wall"
    );

    for ticker in &state.ticker_prices {
        let change = ticker
            .change_percent
            .map(|pct| format_percent(pct / 100.0))
            .unwrap_or_default();
        tracing::info!(
            symbol = %ticker.symbol,
            price = %format_usd(ticker.price),
            %change,
            "Ticker"
        );
    }

    if let Some(pnl) = state.portfolio_metrics.as_ref().and_then(|m| m.pnl) {
        tracing::info!(pnl = %format_usd(pnl), "Portfolio");
    }
}
