//! Port traits: the hexagonal boundary between the kick assist logic and
//! the host firmware.
//!
//! ```text
//!   Host adapter ──▶ Port trait ──▶ KickAssist (domain)
//! ```
//!
//! The host implements these traits (ADC, motor interface, timeout
//! module, terminal).  [`KickAssist`](super::service::KickAssist) and
//! [`CustomApp`](super::runner::CustomApp) consume them via generics, so
//! the domain core never touches hardware directly.

use crate::error::TerminalError;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Analog input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Analog inputs on the COMM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogChannel {
    /// Primary external input (ADC1), the step sensor.
    Ext,
    /// Secondary external input (ADC2).
    Ext2,
}

/// Read-side port for analog voltages.
pub trait AnalogPort {
    /// Current voltage on `channel`, in volts.
    fn read_volts(&mut self, channel: AnalogChannel) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Motor control port (driven adapter: domain ↔ motor interface)
// ───────────────────────────────────────────────────────────────

/// The motor controller.  The control algorithm itself belongs to the host.
pub trait MotorPort {
    /// Hold the motor at `erpm` with the host's speed PID.
    fn set_target_speed(&mut self, erpm: f32);

    /// Stop driving the motor and let it coast.
    fn release_motor(&mut self);

    /// Current electrical RPM.
    fn current_speed(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Watchdog port
// ───────────────────────────────────────────────────────────────

/// Host timeout module.  Must be reset every tick, otherwise the host
/// assumes the application stalled and releases the motor itself.
pub trait WatchdogPort {
    fn reset(&self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / terminal)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`AppEvent`]s through this port.  Adapters decide
/// where they go (serial log, terminal print, telemetry packet).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Terminal port (driving adapter: host terminal → domain)
// ───────────────────────────────────────────────────────────────

/// Terminal command callback.
///
/// `argv[0]` is the command name.  Replies go out through `sink`;
/// `analog` is available for live readings.
pub type CommandHandler = fn(argv: &[&str], analog: &mut dyn AnalogPort, sink: &mut dyn EventSink);

/// Host terminal command registry.
pub trait TerminalPort {
    /// Register `handler` under `name` with its help and argument-usage text.
    fn register_command(
        &mut self,
        name: &'static str,
        help: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Result<(), TerminalError>;

    /// Remove every command bound to `handler`.  Unknown handlers are ignored.
    fn unregister(&mut self, handler: CommandHandler);
}
