//! # Portfolio Endpoints
//!
//! Valuation, asset prices, BTC correlations and rebalancing plans from the
//! portfolio service.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{AssetPrice, Correlation, HealthStatus, PortfolioValue, RebalancingPlan};

use super::client::{ApiClient, Service};
use crate::core::error::Result;
use crate::core::service::PortfolioService;

pub const VALUE_ENDPOINT: &str = "/api/portfolio/value";
pub const ASSET_PRICES_ENDPOINT: &str = "/api/assets/prices";
pub const CORRELATIONS_ENDPOINT: &str = "/api/portfolio/correlations";
pub const REBALANCING_ENDPOINT: &str = "/api/portfolio/rebalancing";

pub struct PortfolioRepository {
    client: Arc<ApiClient>,
}

fn symbols_query(symbols: Option<&str>) -> Vec<(&'static str, String)> {
    symbols
        .map(|s| vec![("symbols", s.to_string())])
        .unwrap_or_default()
}

impl PortfolioRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_portfolio_value(&self) -> Result<PortfolioValue> {
        self.client.get(VALUE_ENDPOINT, Service::Portfolio, &[]).await
    }

    /// `symbols` is a comma-separated filter such as `"BTC,ETH"`.
    pub async fn get_asset_prices(&self, symbols: Option<&str>) -> Result<Vec<AssetPrice>> {
        let query = symbols_query(symbols);
        self.client
            .get(ASSET_PRICES_ENDPOINT, Service::Portfolio, &query)
            .await
    }

    /// BTC row of the asset prices, or [`AssetPrice::btc_placeholder`] when the
    /// service returns none.
    pub async fn get_btc_price(&self) -> Result<AssetPrice> {
        let prices = self.get_asset_prices(Some("BTC")).await?;
        Ok(prices.into_iter().next().unwrap_or_else(|| {
            tracing::debug!("No BTC price from portfolio service, using placeholder");
            AssetPrice::btc_placeholder()
        }))
    }

    pub async fn get_correlations(&self, symbols: Option<&str>) -> Result<Vec<Correlation>> {
        let query = symbols_query(symbols);
        self.client
            .get(CORRELATIONS_ENDPOINT, Service::Portfolio, &query)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_rebalancing_plan(
        &self,
        target_btc_allocation: f64,
    ) -> Result<RebalancingPlan> {
        let query = [("target_btc_allocation", target_btc_allocation.to_string())];
        self.client
            .get(REBALANCING_ENDPOINT, Service::Portfolio, &query)
            .await
    }

    pub async fn get_health(&self) -> Result<HealthStatus> {
        self.client.get("/health", Service::Portfolio, &[]).await
    }
}

#[async_trait]
impl PortfolioService for PortfolioRepository {
    async fn get_portfolio_value(&self) -> Result<PortfolioValue> {
        PortfolioRepository::get_portfolio_value(self).await
    }

    async fn get_asset_prices(&self, symbols: Option<&str>) -> Result<Vec<AssetPrice>> {
        PortfolioRepository::get_asset_prices(self, symbols).await
    }

    async fn get_correlations(&self, symbols: Option<&str>) -> Result<Vec<Correlation>> {
        PortfolioRepository::get_correlations(self, symbols).await
    }

    async fn get_rebalancing_plan(&self, target_btc_allocation: f64) -> Result<RebalancingPlan> {
        PortfolioRepository::get_rebalancing_plan(self, target_btc_allocation).await
    }
}
