//! Application core: kick assist logic, zero direct I/O.
//!
//! The control loop ([`service`]), its worker lifecycle ([`runner`]) and
//! the debug terminal command ([`commands`]).  All interaction with the
//! host firmware happens through the **port traits** defined in
//! [`ports`], keeping this layer testable without a motor controller.

pub mod commands;
pub mod events;
pub mod ports;
pub mod runner;
pub mod service;
