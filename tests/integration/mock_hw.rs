//! Mock host adapters for integration tests.
//!
//! Records every motor call and emitted event so tests can assert on the
//! full history.  All handles are `Clone + Send`: one copy moves into the
//! worker thread, the test keeps another to inject inputs and inspect
//! the record.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use kickassist::app::events::AppEvent;
use kickassist::app::ports::{AnalogChannel, AnalogPort, EventSink, MotorPort, WatchdogPort};

// ── Motor call record ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum MotorCall {
    SetTargetSpeed(f32),
    Release,
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
struct HwState {
    ext_volts: f32,
    ext2_volts: f32,
    erpm: f32,
    calls: Vec<MotorCall>,
}

#[derive(Clone, Default)]
pub struct MockHardware {
    state: Arc<Mutex<HwState>>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_volts(&self, channel: AnalogChannel, volts: f32) {
        let mut s = self.state.lock().unwrap();
        match channel {
            AnalogChannel::Ext => s.ext_volts = volts,
            AnalogChannel::Ext2 => s.ext2_volts = volts,
        }
    }

    pub fn set_speed(&self, erpm: f32) {
        self.state.lock().unwrap().erpm = erpm;
    }

    pub fn calls(&self) -> Vec<MotorCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn last_call(&self) -> Option<MotorCall> {
        self.state.lock().unwrap().calls.last().cloned()
    }
}

impl AnalogPort for MockHardware {
    fn read_volts(&mut self, channel: AnalogChannel) -> f32 {
        let s = self.state.lock().unwrap();
        match channel {
            AnalogChannel::Ext => s.ext_volts,
            AnalogChannel::Ext2 => s.ext2_volts,
        }
    }
}

impl MotorPort for MockHardware {
    fn set_target_speed(&mut self, erpm: f32) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(MotorCall::SetTargetSpeed(erpm));
    }

    fn release_motor(&mut self) {
        self.state.lock().unwrap().calls.push(MotorCall::Release);
    }

    fn current_speed(&mut self) -> f32 {
        self.state.lock().unwrap().erpm
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Terminal replies only, as plain strings.
    pub fn replies(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                AppEvent::TerminalReply(line) => Some(line.as_str().to_owned()),
                _ => None,
            })
            .collect()
    }

    /// Engaged / Disengaged events only.
    pub fn transitions(&self) -> Vec<AppEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, AppEvent::Engaged { .. } | AppEvent::Disengaged))
            .cloned()
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// ── CountingWatchdog ──────────────────────────────────────────

#[derive(Clone, Default)]
pub struct CountingWatchdog {
    resets: Arc<AtomicU32>,
}

#[allow(dead_code)]
impl CountingWatchdog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resets(&self) -> u32 {
        self.resets.load(Ordering::Acquire)
    }
}

impl WatchdogPort for CountingWatchdog {
    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::AcqRel);
    }
}

// ── Helpers ───────────────────────────────────────────────────

/// Poll `cond` every millisecond for up to two seconds.
#[allow(dead_code)]
pub fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    cond()
}
