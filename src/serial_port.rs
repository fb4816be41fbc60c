// src/serial_port.rs

//! [`RoboteqSerial`] + [`RoboteqClock`] on top of the `serialport` crate, for desktop hosts.

use std::io::{self, Read, Write};
use std::time::{Duration, Instant};

use serialport::SerialPort;

use crate::common::hal_traits::{RoboteqClock, RoboteqSerial};

/// RoboteQ controllers ship configured for 115200 8N1.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

// Only bounds a single read/write syscall; the driver applies its own deadline on top.
const PORT_TIMEOUT: Duration = Duration::from_millis(10);

pub struct SerialPortInterface {
    port: Box<dyn SerialPort>,
    epoch: Instant,
}

impl SerialPortInterface {
    /// Opens `path` (e.g. `/dev/ttyACM0` or `COM3`) at `baud_rate`, 8N1.
    pub fn open(path: &str, baud_rate: u32) -> serialport::Result<Self> {
        let port = serialport::new(path, baud_rate)
            .timeout(PORT_TIMEOUT)
            .open()?;
        log::debug!("opened {} at {} baud", path, baud_rate);
        Ok(Self::from_port(port))
    }

    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        SerialPortInterface {
            port,
            epoch: Instant::now(),
        }
    }

    pub fn into_inner(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl core::fmt::Debug for SerialPortInterface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SerialPortInterface")
            .field("port", &self.port.name())
            .finish()
    }
}

impl RoboteqClock for SerialPortInterface {
    fn now_ms(&self) -> u32 {
        // Truncation is the intended wrap-around; the driver subtracts with wrapping_sub.
        self.epoch.elapsed().as_millis() as u32
    }
}

impl RoboteqSerial for SerialPortInterface {
    type Error = io::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let pending = self.port.bytes_to_read().map_err(|e| nb::Error::Other(io::Error::from(e)))?;
        if pending == 0 {
            return Err(nb::Error::WouldBlock);
        }
        let mut byte = [0u8; 1];
        match self.port.read(&mut byte) {
            Ok(1) => Ok(byte[0]),
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) => Err(io_to_nb(e)),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        match self.port.write(&[byte]) {
            Ok(0) => Err(nb::Error::WouldBlock),
            Ok(_) => Ok(()),
            Err(e) => Err(io_to_nb(e)),
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.port.flush().map_err(io_to_nb)
    }
}

/// Timeouts and interruptions mean "try again"; everything else is a real error.
fn io_to_nb(e: io::Error) -> nb::Error<io::Error> {
    match e.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => {
            nb::Error::WouldBlock
        }
        _ => nb::Error::Other(e),
    }
}
