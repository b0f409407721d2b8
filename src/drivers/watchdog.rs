//! Application timeout watchdog.
//!
//! The control worker resets it on every tick.  If no reset arrives within
//! the timeout window the host must assume the worker stalled and release
//! the motor.  This backend keeps the last reset time in an atomic so the
//! host can poll [`Watchdog::is_expired`] from any thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::app::ports::WatchdogPort;

struct State {
    epoch: Instant,
    timeout: Duration,
    /// Microseconds since `epoch` at the last reset.
    last_reset_us: AtomicU64,
}

/// Cloneable handle; all clones share one timer.
#[derive(Clone)]
pub struct Watchdog {
    state: Arc<State>,
}

impl Watchdog {
    /// Create a watchdog that counts as freshly reset.
    pub fn new(timeout: Duration) -> Self {
        log::info!("Watchdog: {} ms timeout", timeout.as_millis());
        Self {
            state: Arc::new(State {
                epoch: Instant::now(),
                timeout,
                last_reset_us: AtomicU64::new(0),
            }),
        }
    }

    /// Feed the watchdog.
    pub fn feed(&self) {
        let now = self.state.epoch.elapsed().as_micros() as u64;
        self.state.last_reset_us.store(now, Ordering::Release);
    }

    /// Time since the last reset.
    pub fn since_last_reset(&self) -> Duration {
        let last = self.state.last_reset_us.load(Ordering::Acquire);
        self.state
            .epoch
            .elapsed()
            .saturating_sub(Duration::from_micros(last))
    }

    pub fn is_expired(&self) -> bool {
        self.since_last_reset() > self.state.timeout
    }
}

impl WatchdogPort for Watchdog {
    fn reset(&self) {
        self.feed();
    }
}
