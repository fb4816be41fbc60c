// src/common/error.rs

use super::response::ResponseParseError;

/// Every way a round trip with the controller can fail.
///
/// `E` is the error type of the underlying [`RoboteqSerial`](super::RoboteqSerial)
/// implementation. Nothing in the driver retries; each variant is handed back
/// to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum RoboteqError<E = ()>
where
    E: core::fmt::Debug, // Still need Debug for the generic Io error
{
    /// No serial interface is bound to the controller. Checked before any I/O.
    #[error("No serial connection to the controller")]
    ConnectionUnavailable,

    /// Underlying I/O error from the serial implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// The deadline elapsed before a terminator (or ACK) was seen.
    #[error("Operation timed out")]
    Timeout,

    /// The reply did not fit the response buffer before its terminator arrived.
    #[error("Response overflowed a {capacity} byte buffer")]
    Overflow { capacity: usize },

    /// The controller answered a command without the `+` success marker.
    #[error("Controller rejected the command")]
    BadCommand,

    /// A query reply was too short or did not match the expected grammar.
    #[error("Bad response: {0}")]
    BadResponse(ResponseParseError),

    /// The request did not fit the fixed command buffer.
    #[error("Failed to format command into buffer")]
    CommandFormatFailed,
}

impl<E: core::fmt::Debug> From<ResponseParseError> for RoboteqError<E> {
    fn from(e: ResponseParseError) -> Self {
        RoboteqError::BadResponse(e)
    }
}
