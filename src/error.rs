//! Unified error types for the kick assist application.
//!
//! The control loop itself has no failure paths; errors only arise at the
//! edges (configuration, worker spawn, terminal registration).  All
//! variants are `Copy` so they can be handed across the host boundary
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level application error
// ---------------------------------------------------------------------------

/// Every fallible operation in the application funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
    /// The worker thread could not be created.
    Spawn,
    /// `start()` was called while the worker is still running.
    AlreadyRunning,
    /// A terminal command operation failed.
    Terminal(TerminalError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Spawn => write!(f, "worker thread spawn failed"),
            Self::AlreadyRunning => write!(f, "application already running"),
            Self::Terminal(e) => write!(f, "terminal: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Terminal errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalError {
    /// The registry has no free slot for another command.
    RegistryFull,
    /// A command with the same name is already registered.
    DuplicateName,
    /// The input line named no registered command.
    UnknownCommand,
    /// The command was invoked with the wrong number of arguments.
    WrongArgCount,
}

impl fmt::Display for TerminalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistryFull => write!(f, "command registry full"),
            Self::DuplicateName => write!(f, "command already registered"),
            Self::UnknownCommand => write!(f, "invalid command"),
            Self::WrongArgCount => write!(f, "This command requires one argument."),
        }
    }
}

impl std::error::Error for TerminalError {}

impl From<TerminalError> for Error {
    fn from(e: TerminalError) -> Self {
        Self::Terminal(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Application-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
