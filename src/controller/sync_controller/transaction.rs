// src/controller/sync_controller/transaction.rs

use super::io_helpers::display_line;
use super::SyncController;
use crate::common::{
    command::{Command, Query},
    error::RoboteqError,
    hal_traits::{Deadline, RoboteqClock, RoboteqSerial},
    reader,
    response::ResponseParseError,
    timing, RESPONSE_BUFFER_SIZE,
};

impl<IF> SyncController<IF>
where
    IF: RoboteqSerial + RoboteqClock,
{
    /// Sends a command and checks the controller accepted it.
    ///
    /// Succeeds iff the reply starts with `+`; any other reply is `BadCommand`.
    pub fn send_command(&mut self, command: &Command) -> Result<(), RoboteqError<IF::Error>> {
        // Unbound check comes before any formatting or I/O
        self.bound_interface()?;
        let line = command.format_into().map_err(|_| RoboteqError::CommandFormatFailed)?;

        let mut buffer = [0u8; RESPONSE_BUFFER_SIZE];
        let len = self.execute_transaction(line.as_bytes(), &mut buffer)?;
        let reply = &buffer[..len];

        log::debug!("send_command: \"{}\" -> \"{}\"", display_line(line.as_bytes()), display_line(reply));

        match reply.first() {
            None => Err(RoboteqError::BadResponse(ResponseParseError::TooShort)),
            Some(&timing::SUCCESS_MARKER) => Ok(()),
            Some(_) => {
                log::warn!("controller rejected \"{}\"", display_line(line.as_bytes()));
                Err(RoboteqError::BadCommand)
            }
        }
    }

    /// Sends a query and returns the raw reply line, terminator included.
    ///
    /// The reply is not interpreted; see [`crate::common::response::parse`].
    pub fn send_query<'buf>(
        &mut self,
        query: &Query,
        buffer: &'buf mut [u8],
    ) -> Result<&'buf [u8], RoboteqError<IF::Error>> {
        self.bound_interface()?;
        let line = query.format_into().map_err(|_| RoboteqError::CommandFormatFailed)?;

        let len = self.execute_transaction(line.as_bytes(), buffer)?;

        log::debug!("send_query: \"{}\" -> \"{}\"", display_line(line.as_bytes()), display_line(&buffer[..len]));

        Ok(&buffer[..len])
    }

    /// Write, flush, then read one reply line. The configured timeout covers
    /// the whole exchange. Returns the reply length.
    fn execute_transaction(
        &mut self,
        request: &[u8],
        read_buffer: &mut [u8],
    ) -> Result<usize, RoboteqError<IF::Error>> {
        let timeout = self.timeout;
        let interface = self.bound_interface()?;
        let deadline = Deadline::start(&*interface, timeout);

        Self::write_bytes(interface, request, deadline)?;
        reader::read_response_until(interface, read_buffer, deadline)
    }
}
