//! In-memory terminal command registry.
//!
//! Implements [`TerminalPort`] for the host side: commands are stored in a
//! fixed-capacity table and a text line is dispatched by its first
//! whitespace-separated token.  `help` is built in and lists every
//! registered command with its usage and help text.

use core::fmt::Write;

use heapless::Vec;
use log::{debug, info};

use crate::app::events::{AppEvent, Line};
use crate::app::ports::{AnalogPort, CommandHandler, EventSink, TerminalPort};
use crate::error::TerminalError;

/// Maximum number of registered commands.
pub const MAX_COMMANDS: usize = 16;

/// Maximum tokens passed to a handler (command name included).  Extra
/// tokens are dropped.
pub const MAX_ARGS: usize = 8;

#[derive(Clone, Copy)]
struct CommandEntry {
    name: &'static str,
    help: &'static str,
    usage: &'static str,
    handler: CommandHandler,
}

/// Host terminal with a fixed command table.
#[derive(Default)]
pub struct TerminalRegistry {
    commands: Vec<CommandEntry, MAX_COMMANDS>,
}

impl TerminalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the command named by the first token of `line`.
    ///
    /// Blank lines are ignored.
    pub fn dispatch(
        &self,
        line: &str,
        analog: &mut dyn AnalogPort,
        sink: &mut dyn EventSink,
    ) -> Result<(), TerminalError> {
        let mut argv: Vec<&str, MAX_ARGS> = Vec::new();
        for token in line.split_whitespace() {
            if argv.push(token).is_err() {
                debug!("terminal: dropping tokens past {}", MAX_ARGS);
                break;
            }
        }
        let Some(&name) = argv.first() else {
            return Ok(());
        };

        if name == "help" {
            self.print_help(sink);
            return Ok(());
        }

        let entry = self
            .commands
            .iter()
            .find(|c| c.name == name)
            .ok_or(TerminalError::UnknownCommand)?;
        (entry.handler)(&argv, analog, sink);
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.commands.iter().any(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn print_help(&self, sink: &mut dyn EventSink) {
        for c in &self.commands {
            let mut line = Line::new();
            let _ = write!(line, "{} {}: {}", c.name, c.usage, c.help);
            sink.emit(&AppEvent::TerminalReply(line));
        }
    }
}

impl TerminalPort for TerminalRegistry {
    fn register_command(
        &mut self,
        name: &'static str,
        help: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Result<(), TerminalError> {
        if name == "help" || self.is_registered(name) {
            return Err(TerminalError::DuplicateName);
        }
        self.commands
            .push(CommandEntry {
                name,
                help,
                usage,
                handler,
            })
            .map_err(|_| TerminalError::RegistryFull)?;
        info!("terminal: registered '{}'", name);
        Ok(())
    }

    fn unregister(&mut self, handler: CommandHandler) {
        self.commands
            .retain(|c| !core::ptr::fn_addr_eq(c.handler, handler));
    }
}
