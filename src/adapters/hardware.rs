//! Simulated motor controller: analog inputs and motor interface.
//!
//! Implements [`AnalogPort`] and [`MotorPort`] on top of lock-free
//! atomics so a test or the simulation binary can inject voltages and
//! speed from one thread while the control worker reads them from another.
//! `f32` values are stored as their bit patterns in `AtomicU32`.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};
use std::sync::Arc;

use log::info;

use crate::app::ports::{AnalogChannel, AnalogPort, MotorPort};

/// Last command the motor interface received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorCommand {
    /// Motor coasting (also the power-on state).
    Released,
    /// Speed PID holding `erpm`.
    Speed(f32),
}

const MODE_RELEASED: u8 = 0;
const MODE_SPEED: u8 = 1;

#[derive(Default)]
struct SimState {
    ext_volts: AtomicU32,
    ext2_volts: AtomicU32,
    erpm: AtomicU32,
    mode: AtomicU8,
    target_erpm: AtomicU32,
    speed_commands: AtomicU32,
    release_commands: AtomicU32,
}

fn load_f32(cell: &AtomicU32) -> f32 {
    f32::from_bits(cell.load(Ordering::Acquire))
}

fn store_f32(cell: &AtomicU32, v: f32) {
    cell.store(v.to_bits(), Ordering::Release);
}

/// Cloneable handle; all clones share one simulated controller.
#[derive(Clone, Default)]
pub struct SimHardware {
    state: Arc<SimState>,
}

impl SimHardware {
    pub fn new() -> Self {
        info!("SimHardware: simulation backend");
        Self::default()
    }

    // ── Injection ─────────────────────────────────────────────

    pub fn set_volts(&self, channel: AnalogChannel, volts: f32) {
        store_f32(self.channel(channel), volts);
    }

    pub fn set_speed(&self, erpm: f32) {
        store_f32(&self.state.erpm, erpm);
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn motor_command(&self) -> MotorCommand {
        match self.state.mode.load(Ordering::Acquire) {
            MODE_SPEED => MotorCommand::Speed(load_f32(&self.state.target_erpm)),
            _ => MotorCommand::Released,
        }
    }

    /// Number of `set_target_speed` calls received.
    pub fn speed_commands(&self) -> u32 {
        self.state.speed_commands.load(Ordering::Acquire)
    }

    /// Number of `release_motor` calls received.
    pub fn release_commands(&self) -> u32 {
        self.state.release_commands.load(Ordering::Acquire)
    }

    fn channel(&self, channel: AnalogChannel) -> &AtomicU32 {
        match channel {
            AnalogChannel::Ext => &self.state.ext_volts,
            AnalogChannel::Ext2 => &self.state.ext2_volts,
        }
    }
}

// ── AnalogPort implementation ─────────────────────────────────

impl AnalogPort for SimHardware {
    fn read_volts(&mut self, channel: AnalogChannel) -> f32 {
        load_f32(self.channel(channel))
    }
}

// ── MotorPort implementation ──────────────────────────────────

impl MotorPort for SimHardware {
    fn set_target_speed(&mut self, erpm: f32) {
        // Target before mode, so a reader that sees MODE_SPEED sees the target.
        store_f32(&self.state.target_erpm, erpm);
        self.state.mode.store(MODE_SPEED, Ordering::Release);
        self.state.speed_commands.fetch_add(1, Ordering::AcqRel);
    }

    fn release_motor(&mut self) {
        self.state.mode.store(MODE_RELEASED, Ordering::Release);
        self.state.release_commands.fetch_add(1, Ordering::AcqRel);
    }

    fn current_speed(&mut self) -> f32 {
        load_f32(&self.state.erpm)
    }
}
