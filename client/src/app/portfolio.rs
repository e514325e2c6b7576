//! # Portfolio View-Model
//!
//! Portfolio dashboard data: valuation, asset prices, BTC correlations and the
//! BTC/USD price used to convert the BTC total into dollars.

use std::sync::Arc;

use shared::{AssetPrice, Correlation, PortfolioValue, PriceQuote, RebalancingPlan};
use tokio::sync::watch;
use tracing::Instrument;

use crate::core::error::{ApiError, Result};
use crate::core::service::{MarketDataService, PortfolioService};
use crate::debug::action_span;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioState {
    pub portfolio_value: Option<PortfolioValue>,
    pub asset_prices: Vec<AssetPrice>,
    pub correlations: Vec<Correlation>,
    pub btc_price: Option<PriceQuote>,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct PortfolioViewModel {
    portfolio: Arc<dyn PortfolioService>,
    market: Arc<dyn MarketDataService>,
    state: watch::Sender<PortfolioState>,
}

impl PortfolioViewModel {
    pub fn new(portfolio: Arc<dyn PortfolioService>, market: Arc<dyn MarketDataService>) -> Self {
        let (state, _) = watch::channel(PortfolioState::default());
        Self {
            portfolio,
            market,
            state,
        }
    }

    pub fn state(&self) -> PortfolioState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PortfolioState> {
        self.state.subscribe()
    }

    /// Load value, asset prices, correlations and the BTC price, in that order.
    ///
    /// Each result is published as soon as it arrives. The first failure stops
    /// the sequence and leaves the remaining fields as they were.
    pub async fn load_portfolio(&self) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let result = self.load_sequence().instrument(action_span("portfolio.load")).await;

        self.state.send_modify(|s| {
            if let Err(e) = &result {
                s.error = Some(format!("Failed to load portfolio: {}", e));
            }
            s.is_loading = false;
        });
    }

    async fn load_sequence(&self) -> Result<()> {
        let value = self.portfolio.get_portfolio_value().await?;
        self.state.send_modify(|s| s.portfolio_value = Some(value));

        let prices = self.portfolio.get_asset_prices(None).await?;
        self.state.send_modify(|s| s.asset_prices = prices);

        let correlations = self.portfolio.get_correlations(None).await?;
        self.state.send_modify(|s| s.correlations = correlations);

        let btc_price = self.market.get_btc_price().await?;
        self.state.send_modify(|s| s.btc_price = Some(btc_price));

        tracing::debug!("Portfolio loaded");
        Ok(())
    }

    pub async fn refresh(&self) {
        self.load_portfolio().await
    }

    /// Plan to move the BTC share to `target_btc_allocation` (a fraction in `[0, 1]`).
    ///
    /// Returns `None` and records the error on failure.
    pub async fn get_rebalancing_plan(
        &self,
        target_btc_allocation: f64,
    ) -> Option<RebalancingPlan> {
        let result = if (0.0..=1.0).contains(&target_btc_allocation) {
            self.portfolio
                .get_rebalancing_plan(target_btc_allocation)
                .instrument(action_span("portfolio.rebalance"))
                .await
        } else {
            Err(ApiError::Validation(
                "Allocation must be between 0 and 1".to_string(),
            ))
        };

        match result {
            Ok(plan) => Some(plan),
            Err(e) => {
                self.state.send_modify(|s| {
                    s.error = Some(format!("Failed to get rebalancing plan: {}", e));
                });
                None
            }
        }
    }

    /// BTC total times the BTC/USD price, once both are loaded.
    pub fn portfolio_value_usd(&self) -> Option<f64> {
        let state = self.state.borrow();
        let total_btc = state.portfolio_value.as_ref()?.total_btc;
        let price = state.btc_price.as_ref()?.price;
        Some(total_btc * price)
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}
