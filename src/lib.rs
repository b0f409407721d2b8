//! KickAssist custom application library.
//!
//! Step-sensor driven speed hold for a motor controller: the sensor and
//! motor speed are filtered over fixed windows, and the motor is held at
//! the captured speed while the sensor is loaded.  Everything the host
//! firmware provides is reached through [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod sensors;
