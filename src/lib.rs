//! First-time setup for an OpenAstroTracker mount.
//!
//! [`coordinate`] turns latitude/longitude text into the mount's `sDDD*MM`
//! tokens and [`mount_control::MountSetupSession`] sends them, with the date
//! and time, over a serial port.

#[cfg(test)]
#[macro_use]
extern crate assert_float_eq;

pub mod astro_math;
pub mod config;
pub mod coordinate;
pub mod mount_control;
pub mod util;

pub use coordinate::GeoCoordinate;
pub use mount_control::{MountSetupSession, SetupCommand};
pub use util::*;
