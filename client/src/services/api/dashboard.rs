//! # Dashboard Endpoints
//!
//! Trading wall metrics from the general API host. Both payloads are read as
//! raw JSON and parsed field by field, so a partially populated response still
//! yields whatever it does contain.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shared::{PortfolioMetrics, TimeframeMetrics};

use super::client::{ApiClient, Service};
use crate::core::error::Result;
use crate::core::service::DashboardService;

pub const TIMEFRAME_METRICS_ENDPOINT: &str = "/api/v1/timeframes/metrics";
pub const OVERVIEW_ENDPOINT: &str = "/api/dashboard/overview";

pub struct DashboardRepository {
    client: Arc<ApiClient>,
}

impl DashboardRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_timeframe_metrics(&self) -> Result<TimeframeMetrics> {
        let json: Value = self
            .client
            .get(TIMEFRAME_METRICS_ENDPOINT, Service::Api, &[])
            .await?;
        Ok(TimeframeMetrics::from_value(&json))
    }

    pub async fn get_dashboard_overview(&self) -> Result<PortfolioMetrics> {
        let json: Value = self.client.get(OVERVIEW_ENDPOINT, Service::Api, &[]).await?;
        Ok(PortfolioMetrics::from_value(&json))
    }
}

#[async_trait]
impl DashboardService for DashboardRepository {
    async fn get_timeframe_metrics(&self) -> Result<TimeframeMetrics> {
        DashboardRepository::get_timeframe_metrics(self).await
    }

    async fn get_dashboard_overview(&self) -> Result<PortfolioMetrics> {
        DashboardRepository::get_dashboard_overview(self).await
    }
}
