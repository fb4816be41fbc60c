// src/common/timing.rs

use core::time::Duration;

// === Round-trip deadline ===

/// Timeout applied to every blocking operation until `set_timeout` is called.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

// === Liveness probe ===

/// Byte sent to ask the controller whether it is alive (ASCII ENQ).
pub const QUERY_CHAR: u8 = 0x05;
/// Byte the controller answers a live probe with (ASCII ACK).
pub const ACK_CHAR: u8 = 0x06;

// === Line framing ===

/// Every request and every reply line ends with a carriage return.
pub const TERMINATOR: u8 = b'\r';
/// First byte of a reply to a successfully executed command.
pub const SUCCESS_MARKER: u8 = b'+';

/// Converts a timeout into the millisecond count compared against the clock.
///
/// Saturates at `u32::MAX`; anything longer than ~49 days is effectively forever anyway.
#[inline]
pub fn as_millis_u32(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}
