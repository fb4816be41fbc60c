// src/common/response/mod.rs

mod error;
pub mod parse; // Make parse functions public

// Re-export items for external use
pub use error::ResponseParseError;
pub use parse::parse_telemetry;

use super::flags::{FaultFlags, StatusFlags};
use super::RESPONSE_BUFFER_SIZE;

/// Firmware identification text as sent by the controller, without `FID=` and the terminator.
pub type FirmwareId = heapless::String<RESPONSE_BUFFER_SIZE>;

/// A decoded query reply.
///
/// Scaled quantities (amps, volts) stay as the x10 integers the controller
/// sends; converting them is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Telemetry {
    /// `FF=<mask>`
    Faults(FaultFlags),
    /// `FS=<mask>`
    Status(StatusFlags),
    /// `FID=<text>`
    Firmware(FirmwareId),
    /// Any single integer reply, and the summed `BA=a:b` reply.
    Value(i32),
    /// `B=<0|1>`
    Flag(bool),
}
