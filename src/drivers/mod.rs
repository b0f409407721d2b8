//! Host-side drivers: tick delay, worker thread spawning, timeout watchdog.

pub mod delay;
pub mod task_pin;
pub mod watchdog;
