//! Outbound application events.
//!
//! [`KickAssist`](super::service::KickAssist) and the terminal command
//! emit these through the [`EventSink`](super::ports::EventSink) port.

/// One line of terminal output.
pub type Line = heapless::String<128>;

/// Control loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistState {
    /// Nothing on the step sensor; motor released.
    #[default]
    Idle,
    /// Step sensor loaded; motor held at the captured speed.
    Engaged,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The step sensor became loaded; the motor was commanded to `target_erpm`.
    Engaged { target_erpm: f32 },

    /// The step sensor was unloaded; the motor was released.
    Disengaged,

    /// Worker thread started.
    Started,

    /// Worker thread exited after a stop request.  `ticks` counts every
    /// tick since the application was created, across restarts.
    Stopped { ticks: u64 },

    /// Text reply from a terminal command.
    TerminalReply(Line),
}

/// A point-in-time snapshot of the control loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub state: AssistState,
    /// Filtered step-sensor voltage (V).
    pub sensor_avg_volts: f64,
    /// Filtered motor speed (ERPM).
    pub speed_avg_erpm: f32,
    pub tick_count: u64,
}
