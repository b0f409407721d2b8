//! Custom application lifecycle: worker thread and terminal registration.
//!
//! The host calls [`CustomApp::start`] once the motor controller is up and
//! [`CustomApp::stop`] before tearing it down.  Between the two, a single
//! worker thread runs [`KickAssist::tick`] at the configured period.
//!
//! Only two flags cross the thread boundary:
//!
//! - `stop_now`: written by the host, read by the worker at the top of
//!   each iteration.
//! - `is_running`: set by `start()` before spawning, cleared by the worker
//!   on exit.  `stop()` polls it.
//!
//! A tick in progress always runs to completion before the stop request
//! is observed.
//!
//! The [`KickAssist`] filter state lives as long as the `CustomApp`, not
//! the worker: `start()` moves it into the thread and joining hands it
//! back, so a stop/start cycle resumes with the same windows and state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::{AppConfig, AppConfiguration};
use crate::drivers::task_pin;
use crate::error::{Error, Result};

use super::commands::{CUSTOM_CMD_HELP, CUSTOM_CMD_NAME, CUSTOM_CMD_USAGE, custom_cmd};
use super::events::{AppEvent, Telemetry};
use super::ports::{AnalogPort, EventSink, MotorPort, TerminalPort, WatchdogPort};
use super::service::KickAssist;

/// Everything the worker thread takes ownership of.
pub struct WorkerPorts<H, W, S, D> {
    /// Analog inputs and motor interface.
    pub hw: H,
    pub watchdog: W,
    pub sink: S,
    /// Sleeps between ticks.
    pub delay: D,
}

/// The custom application as seen by the host firmware.
pub struct CustomApp {
    config: AppConfig,
    /// Parked control state; `None` while the worker owns it.
    assist: Option<KickAssist>,
    stop_now: Arc<AtomicBool>,
    is_running: Arc<AtomicBool>,
    worker: Option<JoinHandle<KickAssist>>,
}

impl CustomApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            assist: Some(KickAssist::new()),
            stop_now: Arc::new(AtomicBool::new(true)),
            is_running: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Spawn the control worker and register the debug terminal command.
    pub fn start<H, W, S, D>(
        &mut self,
        ports: WorkerPorts<H, W, S, D>,
        terminal: &mut impl TerminalPort,
    ) -> Result<()>
    where
        H: AnalogPort + MotorPort + Send + 'static,
        W: WatchdogPort + Send + 'static,
        S: EventSink + Send + 'static,
        D: DelayNs + Send + 'static,
    {
        if self.is_running() {
            warn!("start() ignored: worker already running");
            return Err(Error::AlreadyRunning);
        }
        // Reap a worker that exited after an earlier stop.
        self.join_worker();

        terminal.register_command(CUSTOM_CMD_NAME, CUSTOM_CMD_HELP, CUSTOM_CMD_USAGE, custom_cmd)?;

        self.stop_now.store(false, Ordering::Release);
        self.is_running.store(true, Ordering::Release);

        let stop_now = Arc::clone(&self.stop_now);
        let is_running = Arc::clone(&self.is_running);
        let tick_ms = self.config.tick_interval_ms;
        let assist = self.assist.take().unwrap_or_default();
        let spawned = task_pin::spawn_worker(
            self.config.worker_name.as_str(),
            self.config.worker_stack_kb,
            move || run_worker(assist, ports, &stop_now, &is_running, tick_ms),
        );
        match spawned {
            Ok(handle) => self.worker = Some(handle),
            Err(e) => {
                // The closure, and the control state with it, is gone.
                self.assist = Some(KickAssist::new());
                self.is_running.store(false, Ordering::Release);
                self.stop_now.store(true, Ordering::Release);
                terminal.unregister(custom_cmd);
                return Err(e);
            }
        }

        info!(
            "CustomApp started ({} ms tick, '{}' registered)",
            tick_ms, CUSTOM_CMD_NAME
        );
        Ok(())
    }

    /// Unregister the terminal command, ask the worker to exit, and block
    /// until it has.
    pub fn stop(&mut self, terminal: &mut impl TerminalPort) {
        terminal.unregister(custom_cmd);

        self.stop_now.store(true, Ordering::Release);
        let poll = Duration::from_millis(u64::from(self.config.stop_poll_interval_ms));
        while self.is_running.load(Ordering::Acquire) {
            std::thread::sleep(poll);
        }
        self.join_worker();
        info!("CustomApp stopped");
    }

    /// Accept the host's application configuration.  Reserved; nothing in
    /// it currently affects the kick assist.
    pub fn configure(&mut self, conf: &AppConfiguration) {
        debug!("configure: {:?}", conf);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Snapshot of the parked control state.  `None` while the worker
    /// is running.
    pub fn telemetry(&self) -> Option<Telemetry> {
        self.assist.as_ref().map(KickAssist::telemetry)
    }

    // ── Internal ──────────────────────────────────────────────

    fn join_worker(&mut self) {
        if let Some(handle) = self.worker.take() {
            match handle.join() {
                Ok(assist) => self.assist = Some(assist),
                Err(_) => {
                    warn!("worker thread panicked; control state reset");
                    self.assist = Some(KickAssist::new());
                }
            }
        }
    }
}

impl Drop for CustomApp {
    fn drop(&mut self) {
        self.stop_now.store(true, Ordering::Release);
        self.join_worker();
    }
}

/// Worker body: tick until `stop_now` is observed, then hand the
/// control state back.
fn run_worker<H, W, S, D>(
    mut assist: KickAssist,
    mut ports: WorkerPorts<H, W, S, D>,
    stop_now: &AtomicBool,
    is_running: &AtomicBool,
    tick_ms: u32,
) -> KickAssist
where
    H: AnalogPort + MotorPort,
    W: WatchdogPort,
    S: EventSink,
    D: DelayNs,
{
    let _running = RunningGuard(is_running);
    ports.sink.emit(&AppEvent::Started);

    loop {
        if stop_now.load(Ordering::Acquire) {
            assist.log_telemetry();
            ports.sink.emit(&AppEvent::Stopped {
                ticks: assist.tick_count(),
            });
            return assist;
        }

        assist.tick(&mut ports.hw, &ports.watchdog, &mut ports.sink);

        ports.delay.delay_ms(tick_ms);
    }
}

/// Clears `is_running` on every worker exit path, panics included.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
