//! In-memory service fakes for view-model tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use parking_lot::Mutex;
use shared::{
    AssetPrice, Correlation, OhlcvSeries, PortfolioMetrics, PortfolioValue, PriceQuote,
    RebalancingPlan, Signal, SignalCategory, SignalSummary, TimeframeMetrics, Token, UserProfile,
};

use crate::core::error::{ApiError, Result};
use crate::core::service::{
    AuthService, DashboardService, MarketDataService, PortfolioService, SignalService,
};
use crate::services::api::FrameStream;

pub fn network_error() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

pub fn token(access: &str) -> Token {
    Token {
        access_token: access.to_string(),
        token_type: "bearer".to_string(),
        expires_in: Some(1800),
    }
}

pub fn profile(username: &str) -> UserProfile {
    UserProfile {
        id: Some("1".to_string()),
        username: username.to_string(),
        email: None,
        is_active: true,
    }
}

pub fn signal(symbol: &str, signal_type: &str, strength: &str, confidence: f64) -> Signal {
    Signal {
        symbol: symbol.to_string(),
        signal_type: signal_type.to_string(),
        category: "swing".to_string(),
        entry_price: 100.0,
        take_profit: 110.0,
        stop_loss: 95.0,
        take_profit_pct: 10.0,
        stop_loss_pct: 5.0,
        risk_reward_ratio: 2.0,
        position_size_pct: 1.0,
        strength: strength.to_string(),
        confidence,
        timestamp: "2024-01-01T00:00:00Z".to_string(),
        is_valid: true,
        metadata: HashMap::new(),
    }
}

pub fn signal_json(symbol: &str) -> String {
    serde_json::to_string(&signal(symbol, "BUY", "strong", 0.9)).unwrap()
}

pub fn summary(total: u32) -> SignalSummary {
    SignalSummary {
        total_signals: total,
        by_category: HashMap::new(),
        by_strength: HashMap::new(),
        timestamp: "2024-01-01T00:00:00Z".to_string(),
    }
}

pub fn quote(symbol: &str, price: f64) -> PriceQuote {
    PriceQuote {
        symbol: symbol.to_string(),
        price,
        timestamp: 1_700_000_000,
        provider: "fake".to_string(),
        cached: true,
    }
}

pub fn portfolio_value(total_btc: f64) -> PortfolioValue {
    PortfolioValue {
        total_btc,
        total_usd: None,
        holdings_btc: HashMap::new(),
        btc_allocation: 0.6,
        timestamp: "2024-01-01T00:00:00Z".to_string(),
    }
}

// region:    --- Auth

pub struct FakeAuth {
    pub login_result: Mutex<Result<Token>>,
    pub profile_result: Mutex<Result<UserProfile>>,
    pub refresh_result: Mutex<Result<Token>>,
    pub login_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    pub invalidations: AtomicUsize,
}

impl Default for FakeAuth {
    fn default() -> Self {
        Self {
            login_result: Mutex::new(Ok(token("access"))),
            profile_result: Mutex::new(Ok(profile("alice"))),
            refresh_result: Mutex::new(Ok(token("renewed"))),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            invalidations: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn login(&self, _username: &str, _password: &str) -> Result<Token> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_result.lock().clone()
    }

    async fn logout(&self) {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn refresh_token(&self) -> Result<Token> {
        self.refresh_result.lock().clone()
    }

    async fn get_profile(&self) -> Result<UserProfile> {
        self.profile_result.lock().clone()
    }

    fn invalidate_session(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}

// endregion: --- Auth

// region:    --- Market

#[derive(Default)]
pub struct FakeMarket {
    pub prices: HashMap<String, f64>,
    pub failing: HashSet<String>,
    pub calls: AtomicUsize,
}

impl FakeMarket {
    pub fn with_prices(symbols: &[&str], price: f64) -> Self {
        Self {
            prices: symbols.iter().map(|s| (s.to_string(), price)).collect(),
            ..Default::default()
        }
    }

    pub fn failing(mut self, symbols: &[&str]) -> Self {
        self.failing = symbols.iter().map(|s| s.to_string()).collect();
        self
    }
}

#[async_trait]
impl MarketDataService for FakeMarket {
    async fn get_price(
        &self,
        symbol: &str,
        _provider: Option<&str>,
        _use_cache: bool,
    ) -> Result<PriceQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(symbol) {
            return Err(network_error());
        }
        self.prices
            .get(symbol)
            .map(|price| quote(symbol, *price))
            .ok_or_else(|| ApiError::Status { status: 404, message: "Unknown symbol".to_string() })
    }

    async fn get_ohlcv(
        &self,
        _symbol: &str,
        _interval: &str,
        _provider: Option<&str>,
        _use_cache: bool,
    ) -> Result<OhlcvSeries> {
        Err(network_error())
    }
}

// endregion: --- Market

// region:    --- Portfolio

pub struct FakePortfolio {
    pub value: Mutex<Result<PortfolioValue>>,
    pub asset_prices: Mutex<Result<Vec<AssetPrice>>>,
    pub correlations: Mutex<Result<Vec<Correlation>>>,
    pub plan: Mutex<Result<RebalancingPlan>>,
}

impl Default for FakePortfolio {
    fn default() -> Self {
        Self {
            value: Mutex::new(Ok(portfolio_value(2.0))),
            asset_prices: Mutex::new(Ok(vec![AssetPrice::btc_placeholder()])),
            correlations: Mutex::new(Ok(Vec::new())),
            plan: Mutex::new(Ok(RebalancingPlan {
                target_btc_allocation: 0.5,
                current_btc_allocation: 0.6,
                actions: Vec::new(),
            })),
        }
    }
}

#[async_trait]
impl PortfolioService for FakePortfolio {
    async fn get_portfolio_value(&self) -> Result<PortfolioValue> {
        self.value.lock().clone()
    }

    async fn get_asset_prices(&self, _symbols: Option<&str>) -> Result<Vec<AssetPrice>> {
        self.asset_prices.lock().clone()
    }

    async fn get_correlations(&self, _symbols: Option<&str>) -> Result<Vec<Correlation>> {
        self.correlations.lock().clone()
    }

    async fn get_rebalancing_plan(&self, _target_btc_allocation: f64) -> Result<RebalancingPlan> {
        self.plan.lock().clone()
    }
}

// endregion: --- Portfolio

// region:    --- Signals

pub struct FakeSignals {
    pub signals: Mutex<Result<Vec<Signal>>>,
    pub summary: Mutex<Result<SignalSummary>>,
    pub last_category: Mutex<Option<SignalCategory>>,
    /// Frames served by the next stream, which then stays open.
    pub frames: Mutex<Vec<String>>,
    /// Frames served by the next stream, which then ends.
    pub closing: Mutex<bool>,
    pub connect_error: Mutex<Option<ApiError>>,
    pub connect_calls: AtomicUsize,
}

impl Default for FakeSignals {
    fn default() -> Self {
        Self {
            signals: Mutex::new(Ok(Vec::new())),
            summary: Mutex::new(Ok(summary(0))),
            last_category: Mutex::new(None),
            frames: Mutex::new(Vec::new()),
            closing: Mutex::new(false),
            connect_error: Mutex::new(None),
            connect_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SignalService for FakeSignals {
    async fn generate_signals(
        &self,
        category: SignalCategory,
        _symbols: Option<&str>,
        _ai_enhanced: bool,
    ) -> Result<Vec<Signal>> {
        *self.last_category.lock() = Some(category);
        self.signals.lock().clone()
    }

    async fn get_bitcoin_signals(&self, ai_enhanced: bool) -> Result<Vec<Signal>> {
        self.generate_signals(SignalCategory::Bitcoin, None, ai_enhanced).await
    }

    async fn get_signal_summary(&self) -> Result<SignalSummary> {
        self.summary.lock().clone()
    }

    async fn connect_signal_stream(&self) -> Result<FrameStream> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.connect_error.lock().clone() {
            return Err(err);
        }
        let frames: Vec<Result<String>> = self.frames.lock().drain(..).map(Ok).collect();
        if *self.closing.lock() {
            Ok(Box::pin(stream::iter(frames)))
        } else {
            Ok(Box::pin(stream::iter(frames).chain(stream::pending())))
        }
    }
}

// endregion: --- Signals

// region:    --- Dashboard

pub struct FakeDashboard {
    pub metrics: Mutex<Result<TimeframeMetrics>>,
    pub overview: Mutex<Result<PortfolioMetrics>>,
    pub calls: AtomicUsize,
}

impl Default for FakeDashboard {
    fn default() -> Self {
        Self {
            metrics: Mutex::new(Ok(TimeframeMetrics::default())),
            overview: Mutex::new(Ok(PortfolioMetrics::default())),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DashboardService for FakeDashboard {
    async fn get_timeframe_metrics(&self) -> Result<TimeframeMetrics> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.metrics.lock().clone()
    }

    async fn get_dashboard_overview(&self) -> Result<PortfolioMetrics> {
        self.overview.lock().clone()
    }
}

// endregion: --- Dashboard
