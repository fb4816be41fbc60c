// src/lib.rs

//! Blocking driver for RoboteQ motor controllers speaking the ASCII serial protocol.
//!
//! Bring your own serial line and millisecond clock by implementing
//! [`RoboteqSerial`] and [`RoboteqClock`], then drive the controller through
//! [`SyncController`]:
//!
//! ```ignore
//! let mut controller = roboteq::SyncController::new(interface);
//! controller.is_connected()?;
//! controller.command_motor_power(1, 250)?;
//! let volts_x10 = controller.query_battery_voltage()?;
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)] // no_std unless testing or std is requested

pub mod common;
pub mod controller;

#[cfg(feature = "serialport")]
pub mod serial_port;

// Re-export key types for convenience
pub use common::{
    Command, FaultFlags, FirmwareId, Query, ResponseParseError, RoboteqClock, RoboteqError,
    RoboteqSerial, StatusFlags, Telemetry,
};
pub use controller::SyncController;
