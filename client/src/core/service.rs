//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//!
//! The repositories in [`crate::services::api`] implement these traits and the
//! view-models in [`crate::app`] only see `Arc<dyn Trait>`, so tests can swap in
//! fakes without a backend.

use async_trait::async_trait;
use shared::{
    AssetPrice, Correlation, OhlcvSeries, PortfolioMetrics, PortfolioValue, PriceQuote,
    RebalancingPlan, Signal, SignalCategory, SignalSummary, TimeframeMetrics, Token, UserProfile,
};

use crate::core::error::Result;
use crate::services::api::websocket::FrameStream;

/// Symbol used for BTC/USD lookups on the data service.
pub const BTC_USD: &str = "BTC/USD";

/// Authentication and session lifecycle
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a token and start the session.
    async fn login(&self, username: &str, password: &str) -> Result<Token>;

    /// End the session. Always succeeds locally.
    async fn logout(&self);

    /// Renew the stored token.
    async fn refresh_token(&self) -> Result<Token>;

    /// Profile of the authenticated user
    async fn get_profile(&self) -> Result<UserProfile>;

    /// Drop the stored token and stop the refresh loop without contacting the server.
    fn invalidate_session(&self);
}

/// Market data service (prices and candles)
#[async_trait]
pub trait MarketDataService: Send + Sync {
    async fn get_price(
        &self,
        symbol: &str,
        provider: Option<&str>,
        use_cache: bool,
    ) -> Result<PriceQuote>;

    async fn get_ohlcv(
        &self,
        symbol: &str,
        interval: &str,
        provider: Option<&str>,
        use_cache: bool,
    ) -> Result<OhlcvSeries>;

    /// Cached BTC/USD quote
    async fn get_btc_price(&self) -> Result<PriceQuote> {
        self.get_price(BTC_USD, None, true).await
    }
}

/// Portfolio valuation and rebalancing
#[async_trait]
pub trait PortfolioService: Send + Sync {
    async fn get_portfolio_value(&self) -> Result<PortfolioValue>;

    /// `symbols` is a comma-separated filter; `None` returns every asset.
    async fn get_asset_prices(&self, symbols: Option<&str>) -> Result<Vec<AssetPrice>>;

    async fn get_correlations(&self, symbols: Option<&str>) -> Result<Vec<Correlation>>;

    /// `target_btc_allocation` is a fraction in `[0, 1]`.
    async fn get_rebalancing_plan(&self, target_btc_allocation: f64) -> Result<RebalancingPlan>;
}

/// Signal generation and streaming
#[async_trait]
pub trait SignalService: Send + Sync {
    async fn generate_signals(
        &self,
        category: SignalCategory,
        symbols: Option<&str>,
        ai_enhanced: bool,
    ) -> Result<Vec<Signal>>;

    async fn get_bitcoin_signals(&self, ai_enhanced: bool) -> Result<Vec<Signal>>;

    async fn get_signal_summary(&self) -> Result<SignalSummary>;

    /// Open the real-time signal stream. Each item is one raw text frame.
    async fn connect_signal_stream(&self) -> Result<FrameStream>;
}

/// Trading wall metrics on the general API host
#[async_trait]
pub trait DashboardService: Send + Sync {
    async fn get_timeframe_metrics(&self) -> Result<TimeframeMetrics>;

    async fn get_dashboard_overview(&self) -> Result<PortfolioMetrics>;
}
