//! KickAssist host simulation.
//!
//! Runs the custom application against simulated hardware:
//!
//! ```text
//!  SimHardware ──▶ CustomApp worker ──▶ LogEventSink
//!       ▲                                   ▲
//!  step profile                      TerminalRegistry ◀── stdin
//! ```
//!
//! Usage: `kickassist-sim [config.json] < commands.txt`
//!
//! After replaying a step-on / step-off profile, each stdin line is
//! dispatched as a terminal command (try `custom_cmd 42` or `help`).
#![deny(unused_must_use)]

use std::io::BufRead;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use kickassist::adapters::hardware::SimHardware;
use kickassist::adapters::log_sink::LogEventSink;
use kickassist::adapters::terminal::TerminalRegistry;
use kickassist::app::ports::AnalogChannel;
use kickassist::app::runner::{CustomApp, WorkerPorts};
use kickassist::config::{AppConfig, AppConfiguration};
use kickassist::drivers::delay::StdDelay;
use kickassist::drivers::watchdog::Watchdog;

/// Unloaded step-sensor voltage.
const SENSOR_IDLE_VOLTS: f32 = 3.3;
/// Step-sensor voltage with a foot on the deck.
const SENSOR_LOADED_VOLTS: f32 = 1.2;
/// Cruising speed while the rider pushes off.
const CRUISE_ERPM: f32 = 4500.0;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("KickAssist sim v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (file or defaults) ──────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            AppConfig::from_json(&json).with_context(|| format!("parsing config {path}"))?
        }
        None => AppConfig::default(),
    };
    config.validate()?;
    let tick = Duration::from_millis(u64::from(config.tick_interval_ms));

    // ── 3. Adapters ───────────────────────────────────────────
    let hw = SimHardware::new();
    hw.set_volts(AnalogChannel::Ext, SENSOR_IDLE_VOLTS);
    hw.set_volts(AnalogChannel::Ext2, 0.0);
    let watchdog = Watchdog::new(Duration::from_millis(u64::from(
        config.watchdog_timeout_ms,
    )));
    let mut terminal = TerminalRegistry::new();

    // ── 4. Start the application ──────────────────────────────
    let mut app = CustomApp::new(config);
    app.configure(&AppConfiguration::default());
    app.start(
        WorkerPorts {
            hw: hw.clone(),
            watchdog: watchdog.clone(),
            sink: LogEventSink::new(),
            delay: StdDelay,
        },
        &mut terminal,
    )?;

    // ── 5. Step profile ───────────────────────────────────────
    // Let the zero-filled window settle above threshold first.
    std::thread::sleep(tick * 40);
    hw.set_speed(CRUISE_ERPM);
    std::thread::sleep(tick * 40);

    info!("profile: foot on");
    hw.set_volts(AnalogChannel::Ext, SENSOR_LOADED_VOLTS);
    std::thread::sleep(tick * 40);
    info!("motor: {:?}", hw.motor_command());

    info!("profile: foot off");
    hw.set_volts(AnalogChannel::Ext, SENSOR_IDLE_VOLTS);
    std::thread::sleep(tick * 40);
    info!("motor: {:?}", hw.motor_command());

    // ── 6. Terminal commands from stdin ───────────────────────
    let mut analog = hw.clone();
    let mut sink = LogEventSink::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if let Err(e) = terminal.dispatch(&line, &mut analog, &mut sink) {
            warn!("{}: {}", line.trim(), e);
        }
    }

    // ── 7. Shutdown ───────────────────────────────────────────
    app.stop(&mut terminal);
    info!(
        "watchdog: last reset {} ms ago",
        watchdog.since_last_reset().as_millis()
    );
    info!(
        "done: {} speed commands, {} releases",
        hw.speed_commands(),
        hw.release_commands()
    );
    Ok(())
}
