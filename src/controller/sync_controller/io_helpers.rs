// src/controller/sync_controller/io_helpers.rs

use super::SyncController; // Access SyncController definition
use crate::common::{
    error::RoboteqError,
    hal_traits::{Deadline, RoboteqClock, RoboteqSerial},
};
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<IF> SyncController<IF>
where
    IF: RoboteqSerial + RoboteqClock,
{
    /// The bound interface, or `ConnectionUnavailable`. Always the first step of an operation.
    pub(super) fn bound_interface(&mut self) -> Result<&mut IF, RoboteqError<IF::Error>> {
        self.interface.as_mut().ok_or(RoboteqError::ConnectionUnavailable)
    }

    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout
    /// error once `deadline` has passed.
    pub(super) fn execute_blocking_io_until<FN, T>(
        interface: &mut IF,
        deadline: Deadline,
        mut f: FN,
    ) -> Result<T, RoboteqError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        loop {
            match f(&mut *interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if deadline.has_expired(&*interface) {
                        return Err(RoboteqError::Timeout);
                    }
                }
                Err(nb::Error::Other(e)) => return Err(RoboteqError::Io(e)),
            }
        }
    }

    /// Writes every byte of `bytes` and flushes. All of it shares `deadline`.
    pub(super) fn write_bytes(
        interface: &mut IF,
        bytes: &[u8],
        deadline: Deadline,
    ) -> Result<(), RoboteqError<IF::Error>> {
        for byte in bytes {
            Self::execute_blocking_io_until(interface, deadline, |iface| iface.write_byte(*byte))?;
        }
        Self::execute_blocking_io_until(interface, deadline, |iface| iface.flush())
    }
}

/// Request/reply line as loggable text, without the trailing CR.
pub(super) fn display_line(bytes: &[u8]) -> &str {
    core::str::from_utf8(bytes)
        .map(|s| s.trim_end_matches('\r'))
        .unwrap_or("<non-utf8>")
}
