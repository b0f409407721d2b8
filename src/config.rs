//! Application configuration parameters
//!
//! Runtime tunables for the kick assist worker.  The step threshold and
//! the filter window sizes are fixed by the sensor wiring and live as
//! constants in [`crate::sensors`], not here.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    // --- Timing ---
    /// Control loop period (milliseconds)
    pub tick_interval_ms: u32,
    /// Poll interval while `stop()` waits for the worker (milliseconds)
    pub stop_poll_interval_ms: u32,
    /// Window after the last heartbeat before the host watchdog trips (milliseconds)
    pub watchdog_timeout_ms: u32,

    // --- Worker ---
    /// Requested worker thread stack (KiB).  A lower bound: the host
    /// raises it to at least [`MIN_STACK_KB`](crate::drivers::task_pin::MIN_STACK_KB).
    pub worker_stack_kb: usize,
    /// Worker thread name, as shown by the host scheduler
    pub worker_name: heapless::String<16>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut worker_name = heapless::String::new();
        let _ = worker_name.push_str("App Custom");

        Self {
            // Timing
            tick_interval_ms: 10, // 100 Hz
            stop_poll_interval_ms: 1,
            watchdog_timeout_ms: 1000,

            // Worker
            worker_stack_kb: 2,
            worker_name,
        }
    }
}

impl AppConfig {
    /// Parse a JSON document.  Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))
    }

    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be > 0"));
        }
        if self.stop_poll_interval_ms == 0 {
            return Err(Error::Config("stop_poll_interval_ms must be > 0"));
        }
        if self.watchdog_timeout_ms <= self.tick_interval_ms {
            return Err(Error::Config(
                "watchdog_timeout_ms must exceed tick_interval_ms",
            ));
        }
        if self.worker_stack_kb == 0 {
            return Err(Error::Config("worker_stack_kb must be > 0"));
        }
        if self.worker_name.is_empty() {
            return Err(Error::Config("worker_name must not be empty"));
        }
        Ok(())
    }
}

/// Host application configuration handed to `configure()`.
///
/// Opaque to this application: the host owns its layout, so it is kept
/// as an untyped JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppConfiguration(pub serde_json::Value);
