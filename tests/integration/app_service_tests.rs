//! Integration tests for the KickAssist tick pipeline:
//! sample → filter → classify → motor command.
//!
//! Single-threaded: each test drives `tick()` directly against the mock
//! adapters.

use super::mock_hw::{CountingWatchdog, MockHardware, MotorCall, RecordingSink};

use kickassist::app::events::{AppEvent, AssistState};
use kickassist::app::ports::{AnalogChannel, AnalogPort, EventSink, MotorPort, WatchdogPort};
use kickassist::app::service::KickAssist;
use kickassist::sensors::SENSOR_SAMPLES;

struct Rig {
    app: KickAssist,
    hw: MockHardware,
    wd: CountingWatchdog,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self {
            app: KickAssist::new(),
            hw: MockHardware::new(),
            wd: CountingWatchdog::new(),
            sink: RecordingSink::new(),
        }
    }

    fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.app.tick(&mut self.hw, &self.wd, &mut self.sink);
        }
    }

    /// Fill the sensor window with an unloaded reading and forget the
    /// start-up transient.
    fn settled() -> Self {
        let mut rig = Self::new();
        rig.hw.set_volts(AnalogChannel::Ext, 3.3);
        rig.run(SENSOR_SAMPLES);
        assert_eq!(rig.app.state(), AssistState::Idle);
        rig.hw.clear_calls();
        rig.sink.clear();
        rig
    }
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn zero_filled_window_engages_then_releases_on_start() {
    let mut rig = Rig::new();
    rig.hw.set_volts(AnalogChannel::Ext, 3.3);

    rig.run(SENSOR_SAMPLES);

    assert_eq!(
        rig.hw.calls(),
        vec![MotorCall::SetTargetSpeed(0.0), MotorCall::Release]
    );
    assert_eq!(
        rig.sink.transitions(),
        vec![AppEvent::Engaged { target_erpm: 0.0 }, AppEvent::Disengaged]
    );
}

// ── Engage / release cycle ───────────────────────────────────

#[test]
fn step_on_holds_average_speed_then_step_off_releases() {
    let mut rig = Rig::settled();

    // Three loaded samples pull the 3.3 V window below 3.0 V.
    rig.hw.set_speed(1000.0);
    rig.hw.set_volts(AnalogChannel::Ext, 1.0);
    rig.run(SENSOR_SAMPLES);

    // Speed window held 3 × 1000 ERPM at the moment of engagement.
    assert_eq!(rig.hw.calls(), vec![MotorCall::SetTargetSpeed(150.0)]);
    assert_eq!(rig.app.state(), AssistState::Engaged);

    rig.hw.set_volts(AnalogChannel::Ext, 3.3);
    rig.run(2 * SENSOR_SAMPLES);

    assert_eq!(
        rig.hw.calls(),
        vec![MotorCall::SetTargetSpeed(150.0), MotorCall::Release]
    );
    assert_eq!(
        rig.sink.transitions(),
        vec![AppEvent::Engaged { target_erpm: 150.0 }, AppEvent::Disengaged]
    );
    assert_eq!(rig.app.state(), AssistState::Idle);
}

#[test]
fn engagement_waits_for_the_filtered_average() {
    let mut rig = Rig::settled();
    rig.hw.set_volts(AnalogChannel::Ext, 1.0);

    // (2 × 1.0 + 18 × 3.3) / 20 is still above threshold.
    rig.run(2);
    assert!(rig.hw.calls().is_empty());

    rig.run(1);
    assert_eq!(rig.hw.calls().len(), 1);
}

#[test]
fn no_duplicate_commands_while_state_is_unchanged() {
    let mut rig = Rig::settled();
    rig.hw.set_volts(AnalogChannel::Ext, 0.2);
    rig.run(500);

    assert_eq!(rig.hw.calls().len(), 1);
    assert_eq!(rig.sink.transitions().len(), 1);
}

// ── Threshold boundary ───────────────────────────────────────

#[test]
fn average_of_exactly_three_volts_is_not_stepped_on() {
    let mut rig = Rig::new();
    rig.hw.set_volts(AnalogChannel::Ext, 3.0);

    // The window reaches exactly 3.0 V on the last fill tick.
    rig.run(SENSOR_SAMPLES);
    assert_eq!(rig.app.state(), AssistState::Idle);
    rig.hw.clear_calls();

    rig.run(100);
    assert!(rig.hw.calls().is_empty());
}

// ── Heartbeat ────────────────────────────────────────────────

#[test]
fn every_tick_resets_the_watchdog() {
    let mut rig = Rig::new();
    rig.run(37);
    assert_eq!(rig.wd.resets(), 37);
}

#[test]
fn second_channel_never_drives_the_classifier() {
    let mut rig = Rig::settled();
    rig.hw.set_volts(AnalogChannel::Ext2, 0.0);
    rig.run(SENSOR_SAMPLES);
    assert!(rig.hw.calls().is_empty());
}

// ── Tick ordering ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    ReadSensor,
    ReadSpeed,
    WatchdogReset,
    Emit,
    SetTargetSpeed,
    Release,
}

/// Hardware, watchdog and sink that all append to one shared journal.
#[derive(Clone, Default)]
struct Journal {
    steps: std::rc::Rc<std::cell::RefCell<Vec<Step>>>,
    volts: f32,
}

impl Journal {
    fn record(&self, step: Step) {
        self.steps.borrow_mut().push(step);
    }

    fn take(&self) -> Vec<Step> {
        std::mem::take(&mut *self.steps.borrow_mut())
    }
}

impl AnalogPort for Journal {
    fn read_volts(&mut self, channel: AnalogChannel) -> f32 {
        assert_eq!(channel, AnalogChannel::Ext);
        self.record(Step::ReadSensor);
        self.volts
    }
}

impl MotorPort for Journal {
    fn set_target_speed(&mut self, _erpm: f32) {
        self.record(Step::SetTargetSpeed);
    }
    fn release_motor(&mut self) {
        self.record(Step::Release);
    }
    fn current_speed(&mut self) -> f32 {
        self.record(Step::ReadSpeed);
        0.0
    }
}

impl WatchdogPort for Journal {
    fn reset(&self) {
        self.record(Step::WatchdogReset);
    }
}

impl EventSink for Journal {
    fn emit(&mut self, _event: &AppEvent) {
        self.record(Step::Emit);
    }
}

#[test]
fn tick_samples_then_heartbeats_then_acts() {
    let mut app = KickAssist::new();
    let mut hw = Journal::default();
    let wd = hw.clone();
    let mut sink = hw.clone();

    // Fresh window engages on the first tick.
    app.tick(&mut hw, &wd, &mut sink);
    assert_eq!(
        hw.take(),
        vec![
            Step::ReadSensor,
            Step::ReadSpeed,
            Step::WatchdogReset,
            Step::Emit,
            Step::SetTargetSpeed
        ]
    );

    // Steady state: sample and heartbeat only.
    app.tick(&mut hw, &wd, &mut sink);
    assert_eq!(
        hw.take(),
        vec![Step::ReadSensor, Step::ReadSpeed, Step::WatchdogReset]
    );
}

#[test]
fn release_is_commanded_after_the_heartbeat() {
    let mut app = KickAssist::new();
    let mut hw = Journal {
        volts: 3.3,
        ..Journal::default()
    };
    let wd = hw.clone();
    let mut sink = hw.clone();

    let mut last = Vec::new();
    while app.state() != AssistState::Idle || app.tick_count() == 0 {
        app.tick(&mut hw, &wd, &mut sink);
        last = hw.take();
    }
    assert_eq!(
        last,
        vec![
            Step::ReadSensor,
            Step::ReadSpeed,
            Step::WatchdogReset,
            Step::Emit,
            Step::Release
        ]
    );
}
