//! Adapters: host-side implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements            | Connects to                 |
//! |-------------|-----------------------|-----------------------------|
//! | `hardware`  | AnalogPort, MotorPort | Simulated ADC + motor       |
//! | `log_sink`  | EventSink             | `log` facade / terminal     |
//! | `terminal`  | TerminalPort          | In-memory command registry  |

pub mod hardware;
pub mod log_sink;
pub mod terminal;
