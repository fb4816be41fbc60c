// src/controller/sync_controller/mod.rs

use crate::common::{
    command::Command,
    error::RoboteqError,
    hal_traits::{Deadline, RoboteqClock, RoboteqSerial},
    reader, timing,
};
use core::time::Duration;

mod io_helpers;
mod telemetry;
mod transaction;

/// Blocking client for one RoboteQ controller on one serial line.
///
/// The controller owns (or, through the `&mut T` impls, borrows) its serial
/// interface. Without one every operation fails with
/// [`RoboteqError::ConnectionUnavailable`] before any I/O is attempted.
///
/// Every method blocks until the reply arrives, the timeout elapses, or the
/// reply overflows the response buffer. Nothing is retried.
#[derive(Debug)]
pub struct SyncController<IF>
where
    IF: RoboteqSerial + RoboteqClock,
{
    interface: Option<IF>,
    timeout: Duration,
}

impl<IF> SyncController<IF>
where
    IF: RoboteqSerial + RoboteqClock,
{
    pub fn new(interface: IF) -> Self {
        SyncController {
            interface: Some(interface),
            timeout: timing::DEFAULT_TIMEOUT,
        }
    }

    /// A controller with no serial interface bound yet.
    pub fn unbound() -> Self {
        SyncController {
            interface: None,
            timeout: timing::DEFAULT_TIMEOUT,
        }
    }

    /// Binds `interface`, handing back the previously bound one, if any.
    pub fn attach(&mut self, interface: IF) -> Option<IF> {
        self.interface.replace(interface)
    }

    /// Unbinds and returns the interface. Later calls fail with `ConnectionUnavailable`.
    pub fn detach(&mut self) -> Option<IF> {
        self.interface.take()
    }

    pub fn is_bound(&self) -> bool {
        self.interface.is_some()
    }

    pub fn interface(&self) -> Option<&IF> {
        self.interface.as_ref()
    }

    pub fn interface_mut(&mut self) -> Option<&mut IF> {
        self.interface.as_mut()
    }

    /// Sets the deadline used by every following operation.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // --- Liveness ---

    /// Probes the controller with the configured timeout.
    pub fn is_connected(&mut self) -> Result<(), RoboteqError<IF::Error>> {
        self.is_connected_within(self.timeout)
    }

    /// Sends ENQ (0x05) and waits for ACK (0x06). Sending and waiting together
    /// take at most `timeout`.
    ///
    /// Bytes other than ACK are dropped while waiting.
    pub fn is_connected_within(&mut self, timeout: Duration) -> Result<(), RoboteqError<IF::Error>> {
        let interface = self.bound_interface()?;
        let deadline = Deadline::start(&*interface, timeout);
        Self::write_bytes(interface, &[timing::QUERY_CHAR], deadline)?;
        reader::wait_for_byte_until(interface, timing::ACK_CHAR, deadline)
    }

    // --- Commands ---

    /// Sets motor power on `channel` (`!G`), nominally -1000..=1000.
    pub fn command_motor_power(&mut self, channel: u8, power: i16) -> Result<(), RoboteqError<IF::Error>> {
        self.send_command(&Command::MotorPower { channel, power })
    }

    /// Emergency stop (`!EX`). Motors stay disabled until released or reset.
    pub fn command_emergency_stop(&mut self) -> Result<(), RoboteqError<IF::Error>> {
        self.send_command(&Command::EmergencyStop)
    }

    pub fn command_release_emergency_stop(&mut self) -> Result<(), RoboteqError<IF::Error>> {
        self.send_command(&Command::ReleaseEmergencyStop)
    }

    pub fn set_user_variable(&mut self, index: u8, value: i32) -> Result<(), RoboteqError<IF::Error>> {
        self.send_command(&Command::SetUserVariable { index, value })
    }

    pub fn set_user_boolean(&mut self, index: u8, value: bool) -> Result<(), RoboteqError<IF::Error>> {
        self.send_command(&Command::SetUserBoolean { index, value })
    }

    /// Encoder pulses per rotation (`^EPPR`).
    pub fn set_encoder_pulse_per_rotation(&mut self, channel: u8, ppr: u16) -> Result<(), RoboteqError<IF::Error>> {
        self.send_command(&Command::SetEncoderPpr { channel, ppr })
    }

    /// Motor amp limit, amps x10 (`^ALIM`).
    pub fn set_motor_amp_limit(&mut self, channel: u8, amps: u16) -> Result<(), RoboteqError<IF::Error>> {
        self.send_command(&Command::SetAmpLimit { channel, amps })
    }

    pub fn load_configuration(&mut self) -> Result<(), RoboteqError<IF::Error>> {
        self.send_command(&Command::LoadConfiguration)
    }

    pub fn save_configuration(&mut self) -> Result<(), RoboteqError<IF::Error>> {
        self.send_command(&Command::SaveConfiguration)
    }
}
