//! Kick assist control loop: the hexagonal core.
//!
//! [`KickAssist`] owns both sample buffers and the activation state.  It
//! exposes a single hardware-agnostic [`tick`](KickAssist::tick); all I/O
//! flows through port traits injected at the call site.
//!
//! ```text
//!  AnalogPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │        KickAssist         │
//!   MotorPort ◀──▶│  filter · classify · act  │ ──▶ WatchdogPort
//!                 └──────────────────────────┘
//! ```

use log::{debug, info};

use crate::sensors::{SensorBuffer, SpeedBuffer, is_stepped_on};

use super::events::{AppEvent, AssistState, Telemetry};
use super::ports::{AnalogChannel, AnalogPort, EventSink, MotorPort, WatchdogPort};

/// Step-sensor driven speed hold.
pub struct KickAssist {
    sensor: SensorBuffer,
    speed: SpeedBuffer,
    state: AssistState,
    tick_count: u64,
}

impl KickAssist {
    pub fn new() -> Self {
        Self {
            sensor: SensorBuffer::new(),
            speed: SpeedBuffer::new(),
            state: AssistState::Idle,
            tick_count: 0,
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: sample → heartbeat → classify → act.
    ///
    /// Returns the new state when this tick caused a transition.
    pub fn tick(
        &mut self,
        hw: &mut (impl AnalogPort + MotorPort),
        watchdog: &impl WatchdogPort,
        sink: &mut impl EventSink,
    ) -> Option<AssistState> {
        self.tick_count += 1;

        // 1. Sample both inputs
        let volts = hw.read_volts(AnalogChannel::Ext);
        self.sensor.push(f64::from(volts));
        let erpm = hw.current_speed();
        self.speed.push(erpm);

        // 2. Tell the host we are alive
        watchdog.reset();

        // 3. Classify against the freshly pushed sample
        let next = if is_stepped_on(&self.sensor) {
            AssistState::Engaged
        } else {
            AssistState::Idle
        };
        if next == self.state {
            return None;
        }

        // 4. Act on the transition
        match next {
            AssistState::Engaged => {
                let target_erpm = self.speed.average();
                sink.emit(&AppEvent::Engaged { target_erpm });
                hw.set_target_speed(target_erpm);
            }
            AssistState::Idle => {
                sink.emit(&AppEvent::Disengaged);
                hw.release_motor();
            }
        }
        debug!(
            "tick {}: {:?} -> {:?} (sensor avg {:.2} V)",
            self.tick_count,
            self.state,
            next,
            self.sensor.average()
        );
        self.state = next;
        Some(next)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> AssistState {
        self.state
    }

    /// Total control ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            state: self.state,
            sensor_avg_volts: self.sensor.average(),
            speed_avg_erpm: self.speed.average(),
            tick_count: self.tick_count,
        }
    }

    /// Log the current filter state.
    pub fn log_telemetry(&self) {
        let t = self.telemetry();
        info!(
            "TELEM | state={:?} | sensor={:.2}V | speed={:.0}erpm | ticks={}",
            t.state, t.sensor_avg_volts, t.speed_avg_erpm, t.tick_count
        );
    }
}

impl Default for KickAssist {
    fn default() -> Self {
        Self::new()
    }
}
