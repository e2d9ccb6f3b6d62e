use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

/// One tick every `1/rate` seconds, shared by all workers.
///
/// At most one tick is banked at a time: a tick nobody is waiting for is held
/// until the next acquire, and further ticks are dropped meanwhile. The first
/// tick is available immediately.
#[derive(Debug)]
pub struct RateGate {
    permits: Arc<Semaphore>,
    ticker: JoinHandle<()>,
    period: Duration,
}

impl RateGate {
    /// Starts the ticker. Returns `None` for `rate == 0` (unlimited).
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(rate_per_sec: u32) -> Option<Self> {
        let period = Duration::from_secs(1).checked_div(rate_per_sec)?;
        let permits = Arc::new(Semaphore::new(0));
        let ticker = spawn_ticker(Arc::clone(&permits), period);
        debug!("rate gate started: one request every {:?}", period);
        Some(Self {
            permits,
            ticker,
            period,
        })
    }

    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Waits for the next tick and consumes it.
    ///
    /// Returns `false` if the gate was stopped while waiting.
    pub async fn acquire(&self) -> bool {
        match self.permits.acquire().await {
            Ok(permit) => {
                permit.forget();
                true
            }
            Err(_closed) => false,
        }
    }

    /// Stops the ticker. Consuming `self` makes a second stop impossible.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for RateGate {
    fn drop(&mut self) {
        self.ticker.abort();
        self.permits.close();
        debug!("rate gate stopped");
    }
}

fn spawn_ticker(permits: Arc<Semaphore>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = interval(period);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            if permits.available_permits() == 0 {
                permits.add_permits(1);
            }
        }
    })
}
