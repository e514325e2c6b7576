//! # Market Data Endpoints
//!
//! Prices and OHLCV candles from the data service.

use std::sync::Arc;

use async_trait::async_trait;
use shared::{HealthStatus, OhlcvSeries, PriceQuote};

use super::client::{ApiClient, Service};
use crate::core::error::Result;
use crate::core::service::{MarketDataService, BTC_USD};

pub const PRICE_ENDPOINT: &str = "/api/v1/data/price";
pub const OHLCV_ENDPOINT: &str = "/api/v1/data/ohlcv";

/// Candle interval used when none is given.
pub const DEFAULT_INTERVAL: &str = "1h";

pub struct DataRepository {
    client: Arc<ApiClient>,
}

impl DataRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Current price for `symbol` (e.g. `"BTC/USD"`).
    #[tracing::instrument(skip(self))]
    pub async fn get_price(
        &self,
        symbol: &str,
        provider: Option<&str>,
        use_cache: bool,
    ) -> Result<PriceQuote> {
        let mut query = vec![("symbol", symbol.to_string())];
        if let Some(provider) = provider {
            query.push(("provider", provider.to_string()));
        }
        query.push(("use_cache", use_cache.to_string()));

        self.client.get(PRICE_ENDPOINT, Service::Data, &query).await
    }

    /// Candles for `symbol` at `interval` (`1m`, `5m`, `15m`, `1h`, `4h`, `1d`).
    #[tracing::instrument(skip(self))]
    pub async fn get_ohlcv(
        &self,
        symbol: &str,
        interval: &str,
        provider: Option<&str>,
        use_cache: bool,
    ) -> Result<OhlcvSeries> {
        let mut query = vec![
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
        ];
        if let Some(provider) = provider {
            query.push(("provider", provider.to_string()));
        }
        query.push(("use_cache", use_cache.to_string()));

        let series: OhlcvSeries = self.client.get(OHLCV_ENDPOINT, Service::Data, &query).await?;
        tracing::debug!(candles = series.data.len(), "OHLCV loaded");
        Ok(series)
    }

    pub async fn get_btc_price(&self) -> Result<PriceQuote> {
        self.get_price(BTC_USD, None, true).await
    }

    pub async fn get_btc_hourly_candles(&self) -> Result<OhlcvSeries> {
        self.get_ohlcv(BTC_USD, DEFAULT_INTERVAL, None, true).await
    }

    pub async fn get_btc_daily_candles(&self) -> Result<OhlcvSeries> {
        self.get_ohlcv(BTC_USD, "1d", None, true).await
    }

    pub async fn get_health(&self) -> Result<HealthStatus> {
        self.client.get("/health", Service::Data, &[]).await
    }
}

#[async_trait]
impl MarketDataService for DataRepository {
    async fn get_price(
        &self,
        symbol: &str,
        provider: Option<&str>,
        use_cache: bool,
    ) -> Result<PriceQuote> {
        DataRepository::get_price(self, symbol, provider, use_cache).await
    }

    async fn get_ohlcv(
        &self,
        symbol: &str,
        interval: &str,
        provider: Option<&str>,
        use_cache: bool,
    ) -> Result<OhlcvSeries> {
        DataRepository::get_ohlcv(self, symbol, interval, provider, use_cache).await
    }
}
