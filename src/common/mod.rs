// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod error;
pub mod flags;
pub mod hal_traits;
pub mod reader;
pub mod response;
pub mod timing;

#[cfg(test)]
pub(crate) mod testutils;

/// Capacity of the buffer a reply line is read into, terminator included.
pub const RESPONSE_BUFFER_SIZE: usize = 64;
/// Capacity of the buffer a request line is formatted into, terminator included.
pub const COMMAND_BUFFER_SIZE: usize = 20;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{Command, CommandBuffer, Query};

// From error.rs
pub use error::RoboteqError;

// From flags.rs
pub use flags::{FaultFlags, StatusFlags};

// From hal_traits.rs
pub use hal_traits::{Deadline, RoboteqClock, RoboteqSerial};

// From reader.rs
pub use reader::{read_response, read_response_until, wait_for_byte, wait_for_byte_until};

// From response/mod.rs (and its sub-modules via its own `pub use`)
pub use response::{
    FirmwareId,
    ResponseParseError,
    Telemetry,
    parse_telemetry,
};
