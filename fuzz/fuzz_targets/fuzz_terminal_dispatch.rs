//! Fuzz target: `TerminalRegistry::dispatch`
//!
//! Feeds arbitrary input lines through the terminal with the debug
//! command registered and asserts that dispatch never panics and that
//! every reply fits a terminal line.
//!
//! cargo fuzz run fuzz_terminal_dispatch

#![no_main]

use kickassist::adapters::terminal::TerminalRegistry;
use kickassist::app::commands::{
    CUSTOM_CMD_HELP, CUSTOM_CMD_NAME, CUSTOM_CMD_USAGE, custom_cmd, parse_c_int,
};
use kickassist::app::events::AppEvent;
use kickassist::app::ports::{AnalogChannel, AnalogPort, EventSink, TerminalPort};
use libfuzzer_sys::fuzz_target;

struct Fixed;

impl AnalogPort for Fixed {
    fn read_volts(&mut self, _channel: AnalogChannel) -> f32 {
        1.65
    }
}

#[derive(Default)]
struct Count(usize);

impl EventSink for Count {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::TerminalReply(line) = event {
            assert!(line.len() <= 128);
        }
        self.0 += 1;
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(line) = core::str::from_utf8(data) else {
        return;
    };

    let _ = parse_c_int(line);

    let mut term = TerminalRegistry::new();
    if term
        .register_command(CUSTOM_CMD_NAME, CUSTOM_CMD_HELP, CUSTOM_CMD_USAGE, custom_cmd)
        .is_err()
    {
        return;
    }

    let mut sink = Count::default();
    let _ = term.dispatch(line, &mut Fixed, &mut sink);
    assert!(sink.0 <= 2);
});
