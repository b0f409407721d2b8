//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade, which the host routes to its terminal.  Terminal replies are
//! printed verbatim.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Engaged { target_erpm } => {
                info!("stepped on");
                log::debug!("ASSIST | holding {:.0} erpm", target_erpm);
            }
            AppEvent::Disengaged => {
                info!("stepped off");
            }
            AppEvent::Started => {
                info!("START | worker running");
            }
            AppEvent::Stopped { ticks } => {
                info!("STOP | worker exited after {} ticks", ticks);
            }
            AppEvent::TerminalReply(line) => {
                info!("{}", line);
            }
        }
    }
}
