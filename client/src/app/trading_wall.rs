//! # Trading Wall View-Model
//!
//! Drives the wall display: world clocks, a ticker tape over a fixed symbol
//! list, and the optional timeframe/portfolio metrics.
//!
//! [`TradingWallViewModel::start`] spawns three independent loops (clock,
//! ticker, metrics). They share the state channel but nothing else, so their
//! updates may interleave in any order.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};
use futures::future::BoxFuture;
use lib_utils::time::{format_time, now_utc};
use parking_lot::Mutex;
use shared::{PortfolioMetrics, TickerPrice, TimeframeMetrics, WorldClock};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::core::service::{DashboardService, MarketDataService};
use crate::debug::spawn_tracked;

/// Symbols shown on the ticker tape, in display order.
pub const TICKER_SYMBOLS: [&str; 11] = [
    "EURUSD", "GBPUSD", "USDJPY", "USDCAD", "AUDUSD", "BTCUSDT", "ETHUSDT", "SPX", "NDX", "GOLD",
    "OIL",
];

pub const NO_DATA_STATUS: &str = "No data available";

/// Loop periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingWallConfig {
    pub clock_interval: Duration,
    pub ticker_interval: Duration,
    pub metrics_interval: Duration,
}

impl Default for TradingWallConfig {
    fn default() -> Self {
        Self {
            clock_interval: Duration::from_secs(1),
            ticker_interval: Duration::from_secs(8),
            metrics_interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradingWallState {
    pub world_clocks: Vec<WorldClock>,
    pub ticker_prices: Vec<TickerPrice>,
    pub metrics: Option<TimeframeMetrics>,
    pub portfolio_metrics: Option<PortfolioMetrics>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub connection_status: String,
    /// RFC3339 time of the last ticker refresh.
    pub last_updated: Option<String>,
}

impl Default for TradingWallState {
    fn default() -> Self {
        Self {
            world_clocks: Vec::new(),
            ticker_prices: Vec::new(),
            metrics: None,
            portfolio_metrics: None,
            is_loading: false,
            error: None,
            connection_status: "Connected".to_string(),
            last_updated: None,
        }
    }
}

// region:    --- Market hours

/// Trading centre with a fixed UTC offset and its regular session.
struct Market {
    city: &'static str,
    timezone: &'static str,
    utc_offset_hours: i32,
    open: (u32, u32),
    close: (u32, u32),
}

impl Market {
    const fn new(
        city: &'static str,
        timezone: &'static str,
        utc_offset_hours: i32,
        open: (u32, u32),
        close: (u32, u32),
    ) -> Self {
        Self {
            city,
            timezone,
            utc_offset_hours,
            open,
            close,
        }
    }
}

const MARKETS: [Market; 6] = [
    Market::new("Sydney", "Australia/Sydney", 10, (10, 0), (16, 0)),
    Market::new("Tokyo", "Asia/Tokyo", 9, (9, 0), (15, 0)),
    Market::new("Hong Kong", "Asia/Hong_Kong", 8, (9, 30), (16, 0)),
    Market::new("London", "Europe/London", 0, (8, 0), (16, 30)),
    Market::new("Frankfurt", "Europe/Berlin", 1, (9, 0), (17, 30)),
    Market::new("New York", "America/New_York", -5, (9, 30), (16, 0)),
];

/// Length of the pre-market window before the open.
const PRE_MARKET_MINUTES: u32 = 60;

struct Session {
    weekday: Weekday,
    minute_of_day: u32,
    open: u32,
    close: u32,
}

impl Session {
    fn at(market: &Market, now: DateTime<Utc>) -> Option<(DateTime<FixedOffset>, Self)> {
        let offset = FixedOffset::east_opt(market.utc_offset_hours * 3600)?;
        let local = now.with_timezone(&offset);
        let session = Self {
            weekday: local.weekday(),
            minute_of_day: local.hour() * 60 + local.minute(),
            open: market.open.0 * 60 + market.open.1,
            close: market.close.0 * 60 + market.close.1,
        };
        Some((local, session))
    }

    fn is_trading_day(&self) -> bool {
        !matches!(self.weekday, Weekday::Sat | Weekday::Sun)
    }

    fn is_open(&self) -> bool {
        self.is_trading_day() && (self.open..self.close).contains(&self.minute_of_day)
    }

    fn is_pre_market(&self) -> bool {
        let window = self.open.saturating_sub(PRE_MARKET_MINUTES)..self.open;
        self.is_trading_day() && window.contains(&self.minute_of_day)
    }
}

/// Clocks for every trading centre at `now`.
///
/// Offsets are fixed (no daylight saving). A market overlaps when it is open
/// while at least one other market is open too.
pub fn world_clocks(now: DateTime<Utc>) -> Vec<WorldClock> {
    let sessions: Vec<_> = MARKETS
        .iter()
        .filter_map(|market| {
            Session::at(market, now).map(|(local, session)| (market, local, session))
        })
        .collect();
    let open_count = sessions.iter().filter(|(_, _, s)| s.is_open()).count();

    sessions
        .iter()
        .map(|(market, local, session)| {
            let is_open = session.is_open();
            WorldClock {
                city: market.city.to_string(),
                timezone: market.timezone.to_string(),
                time: local.time().format("%H:%M").to_string(),
                is_open,
                is_pre_market: session.is_pre_market(),
                is_overlap: is_open && open_count > 1,
            }
        })
        .collect()
}

// endregion: --- Market hours

type Tick = fn(Arc<TradingWallViewModel>) -> BoxFuture<'static, ()>;

pub struct TradingWallViewModel {
    market: Arc<dyn MarketDataService>,
    dashboard: Arc<dyn DashboardService>,
    config: TradingWallConfig,
    state: watch::Sender<TradingWallState>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl TradingWallViewModel {
    pub fn new(
        market: Arc<dyn MarketDataService>,
        dashboard: Arc<dyn DashboardService>,
    ) -> Arc<Self> {
        Self::with_config(market, dashboard, TradingWallConfig::default())
    }

    pub fn with_config(
        market: Arc<dyn MarketDataService>,
        dashboard: Arc<dyn DashboardService>,
        config: TradingWallConfig,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(TradingWallState::default());
        Arc::new(Self {
            market,
            dashboard,
            config,
            state,
            tasks: Mutex::new(Vec::new()),
        })
    }

    pub fn state(&self) -> TradingWallState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TradingWallState> {
        self.state.subscribe()
    }

    pub fn ticker_symbols(&self) -> &'static [&'static str] {
        &TICKER_SYMBOLS
    }

    /// Start the clock, ticker and metrics loops. Each runs its first update
    /// immediately. Calling `start` again restarts them.
    pub fn start(self: &Arc<Self>) {
        self.stop();

        let loops: [(&'static str, Duration, Tick); 3] = [
            ("wall_clock", self.config.clock_interval, |vm| {
                Box::pin(async move { vm.refresh_clocks() })
            }),
            ("wall_ticker", self.config.ticker_interval, |vm| {
                Box::pin(async move { vm.refresh_ticker().await })
            }),
            ("wall_metrics", self.config.metrics_interval, |vm| {
                Box::pin(async move { vm.refresh_metrics().await })
            }),
        ];

        let handles: Vec<_> = loops
            .into_iter()
            .map(|(name, period, tick)| spawn_loop(Arc::downgrade(self), name, period, tick))
            .collect();

        tracing::info!(
            clock_ms = self.config.clock_interval.as_millis(),
            ticker_ms = self.config.ticker_interval.as_millis(),
            metrics_ms = self.config.metrics_interval.as_millis(),
            "Trading wall started"
        );
        *self.tasks.lock() = handles;
    }

    /// Abort all three loops.
    pub fn stop(&self) {
        let handles = std::mem::take(&mut *self.tasks.lock());
        if !handles.is_empty() {
            for handle in handles {
                handle.abort();
            }
            tracing::info!("Trading wall stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.tasks.lock().iter().any(|h| !h.is_finished())
    }

    /// One-off update of everything.
    pub async fn refresh(&self) {
        self.state.send_modify(|s| s.is_loading = true);
        self.refresh_clocks();
        self.refresh_ticker().await;
        self.refresh_metrics().await;
        self.state.send_modify(|s| s.is_loading = false);
    }

    pub fn refresh_clocks(&self) {
        let clocks = world_clocks(now_utc());
        self.state.send_modify(|s| s.world_clocks = clocks);
    }

    /// Fetch every ticker symbol in order, skipping the ones that fail.
    pub async fn refresh_ticker(&self) {
        let previous: HashMap<String, f64> = self
            .state
            .borrow()
            .ticker_prices
            .iter()
            .map(|t| (t.symbol.clone(), t.price))
            .collect();

        let mut prices = Vec::with_capacity(TICKER_SYMBOLS.len());
        for symbol in TICKER_SYMBOLS {
            match self.market.get_price(symbol, None, true).await {
                Ok(quote) => prices.push(TickerPrice::new(
                    symbol,
                    quote.price,
                    quote.timestamp,
                    previous.get(symbol).copied(),
                )),
                Err(e) => tracing::debug!(symbol, error = %e, "Ticker symbol skipped"),
            }
        }

        let status = ticker_status(prices.len(), TICKER_SYMBOLS.len());
        tracing::debug!(status = %status, "Ticker refreshed");
        self.state.send_modify(|s| {
            s.ticker_prices = prices;
            s.connection_status = status;
            s.last_updated = Some(format_time(now_utc()));
        });
    }

    /// Metrics are optional: a failed fetch keeps the previous value.
    pub async fn refresh_metrics(&self) {
        match self.dashboard.get_timeframe_metrics().await {
            Ok(metrics) => self.state.send_modify(|s| s.metrics = Some(metrics)),
            Err(e) => tracing::debug!(error = %e, "Timeframe metrics unavailable"),
        }
        match self.dashboard.get_dashboard_overview().await {
            Ok(metrics) => self.state.send_modify(|s| s.portfolio_metrics = Some(metrics)),
            Err(e) => tracing::debug!(error = %e, "Dashboard overview unavailable"),
        }
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.error = None);
    }
}

impl Drop for TradingWallViewModel {
    fn drop(&mut self) {
        for handle in self.tasks.get_mut().drain(..) {
            handle.abort();
        }
    }
}

/// `"Connected (k/n symbols)"`, or [`NO_DATA_STATUS`] when nothing loaded.
pub fn ticker_status(loaded: usize, total: usize) -> String {
    if loaded > 0 {
        format!("Connected ({}/{} symbols)", loaded, total)
    } else {
        NO_DATA_STATUS.to_string()
    }
}

fn spawn_loop(
    vm: Weak<TradingWallViewModel>,
    name: &'static str,
    period: Duration,
    tick: Tick,
) -> JoinHandle<()> {
    spawn_tracked(name, async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let Some(vm) = vm.upgrade() else {
                break;
            };
            tick(vm).await;
        }
    })
}
