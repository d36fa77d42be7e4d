//! Injectable tick sources for periodic session refresh.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Default session refresh interval
pub const SESSION_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Source of periodic refresh ticks.
pub trait Ticker: Send {
    /// Resolve at the next tick.
    fn tick(&mut self) -> impl Future<Output = ()> + Send;
}

/// Wall-clock ticker with a fixed period.
///
/// The first tick fires one period after creation. Late ticks are delayed
/// rather than bursted.
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(SESSION_REFRESH_INTERVAL)
    }
}

impl Ticker for IntervalTicker {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Ticker driven by a [`TickHandle`], for deterministic tests.
///
/// Once every handle is dropped the ticker never fires again.
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

/// Sender side of a [`ManualTicker`].
#[derive(Clone)]
pub struct TickHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl TickHandle {
    /// Fire one tick. Returns `false` if the ticker is gone.
    pub fn tick(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

/// Create a manual ticker and its handle.
pub fn manual_ticker() -> (TickHandle, ManualTicker) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TickHandle { tx }, ManualTicker { rx })
}

impl Ticker for ManualTicker {
    async fn tick(&mut self) {
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}
