//! Debug terminal command.
//!
//! `custom_cmd [d]` echoes an integer back together with live readings of
//! both external ADC inputs.  Administrative tooling only; it never
//! touches the control loop state.

use core::fmt::Write;

use crate::error::TerminalError;

use super::events::{AppEvent, Line};
use super::ports::{AnalogChannel, AnalogPort, EventSink};

pub const CUSTOM_CMD_NAME: &str = "custom_cmd";
pub const CUSTOM_CMD_HELP: &str = "Print the number d";
pub const CUSTOM_CMD_USAGE: &str = "[d]";

/// Value echoed when the argument holds no integer.
pub const PARSE_FALLBACK: i32 = -1;

/// Terminal handler for [`CUSTOM_CMD_NAME`].
///
/// `argv[0]` is the command name, so exactly one argument means
/// `argv.len() == 2`.
pub fn custom_cmd(argv: &[&str], analog: &mut dyn AnalogPort, sink: &mut dyn EventSink) {
    let [_, arg] = argv else {
        reply(sink, format_args!("{}", TerminalError::WrongArgCount));
        return;
    };

    let d = parse_c_int(arg).unwrap_or(PARSE_FALLBACK);
    reply(sink, format_args!("You have entered {}", d));

    let adc1 = f64::from(analog.read_volts(AnalogChannel::Ext));
    let adc2 = f64::from(analog.read_volts(AnalogChannel::Ext2));
    reply(sink, format_args!("ADC1: {:.2} V ADC2: {:.2} V", adc1, adc2));
}

fn reply(sink: &mut dyn EventSink, args: core::fmt::Arguments<'_>) {
    let mut line = Line::new();
    // Overlong output is truncated at the line capacity.
    let _ = line.write_fmt(args);
    sink.emit(&AppEvent::TerminalReply(line));
}

/// Parse the leading integer of `s` the way a `%d` conversion does.
///
/// Leading whitespace and one sign are accepted; parsing stops at the
/// first non-digit.  Out-of-range values saturate to the `i32` bounds.
/// Returns `None` when no digit follows.
pub fn parse_c_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if !seen {
        return None;
    }

    let value = if negative { -value } else { value };
    Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}
