// src/common/reader.rs

//! Deadline-checked reads from a non-blocking byte source.
//!
//! Both functions busy-poll `read_byte` and never sleep, so the only thing
//! bounding them is the timeout. They hold no state and work the same from a
//! plain blocking call or from inside a single cooperative task.

use core::time::Duration;

use super::{
    error::RoboteqError,
    hal_traits::{Deadline, RoboteqClock, RoboteqSerial},
    timing,
};

/// Drains the interface into `buffer` until a carriage return arrives.
///
/// Returns the number of bytes stored, terminator included.
///
/// The capacity is exclusive: `buffer.len()` bytes can be stored, and the byte
/// that would be number `buffer.len() + 1` fails the read with `Overflow`
/// before anything is written out of bounds. A reply that ends exactly on the
/// last slot succeeds.
pub fn read_response<IF>(
    interface: &mut IF,
    buffer: &mut [u8],
    timeout: Duration,
) -> Result<usize, RoboteqError<IF::Error>>
where
    IF: RoboteqSerial + RoboteqClock + ?Sized,
{
    let deadline = Deadline::start(&*interface, timeout);
    read_response_until(interface, buffer, deadline)
}

/// [`read_response`] against a deadline that may already be partly spent.
pub fn read_response_until<IF>(
    interface: &mut IF,
    buffer: &mut [u8],
    deadline: Deadline,
) -> Result<usize, RoboteqError<IF::Error>>
where
    IF: RoboteqSerial + RoboteqClock + ?Sized,
{
    let mut len = 0;

    while !deadline.has_expired(&*interface) {
        match interface.read_byte() {
            Ok(byte) => {
                if len >= buffer.len() {
                    log::error!("response overflowed {} byte buffer", buffer.len());
                    return Err(RoboteqError::Overflow {
                        capacity: buffer.len(),
                    });
                }
                buffer[len] = byte;
                len += 1;
                if byte == timing::TERMINATOR {
                    return Ok(len);
                }
            }
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(e)) => return Err(RoboteqError::Io(e)),
        }
    }

    log::error!(
        "timeout reading controller after {} ms ({} bytes buffered)",
        deadline.budget_ms(),
        len
    );
    Err(RoboteqError::Timeout)
}

/// Polls until `expected` shows up, discarding anything else that arrives.
pub fn wait_for_byte<IF>(
    interface: &mut IF,
    expected: u8,
    timeout: Duration,
) -> Result<(), RoboteqError<IF::Error>>
where
    IF: RoboteqSerial + RoboteqClock + ?Sized,
{
    let deadline = Deadline::start(&*interface, timeout);
    wait_for_byte_until(interface, expected, deadline)
}

pub fn wait_for_byte_until<IF>(
    interface: &mut IF,
    expected: u8,
    deadline: Deadline,
) -> Result<(), RoboteqError<IF::Error>>
where
    IF: RoboteqSerial + RoboteqClock + ?Sized,
{
    while !deadline.has_expired(&*interface) {
        match interface.read_byte() {
            Ok(byte) if byte == expected => return Ok(()),
            Ok(other) => log::debug!("ignoring {:#04x} while waiting for {:#04x}", other, expected),
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(e)) => return Err(RoboteqError::Io(e)),
        }
    }

    Err(RoboteqError::Timeout)
}
