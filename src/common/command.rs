//! RoboteQ request definitions.
//!
//! Requests are single ASCII lines terminated by `\r`. The first character
//! tells the controller what kind of request it is:
//!
//! * `!` runtime command (motor power, emergency stop, variables)
//! * `^` configuration write
//! * `%` maintenance (EEPROM load/save)
//! * `?` runtime query
//! * `~` configuration read-back
//!
//! Commands are answered with `+` (accepted) or `-` (rejected). Queries are
//! answered with `TAG=value` lines, see [`crate::common::response::parse`].

use core::fmt::{self, Write};

use arrayvec::ArrayString;

use super::COMMAND_BUFFER_SIZE;

/// Fixed-capacity buffer a request line is rendered into before it is written.
pub type CommandBuffer = ArrayString<COMMAND_BUFFER_SIZE>;

/// A request whose reply is only a success/failure marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set motor power (`!G cc p`). `power` is nominally -1000..=1000.
    MotorPower { channel: u8, power: i16 },
    /// Emergency stop (`!EX`). The controller needs a release (`!MG`) or reset afterwards.
    EmergencyStop,
    /// Release a previous emergency stop (`!MG`).
    ReleaseEmergencyStop,
    /// Write an integer user variable used by MicroBasic scripts (`!VAR n v`).
    SetUserVariable { index: u8, value: i32 },
    /// Write a boolean user variable (`!B n 0|1`).
    SetUserBoolean { index: u8, value: bool },
    /// Configure encoder pulses per rotation (`^EPPR cc ppr`).
    SetEncoderPpr { channel: u8, ppr: u16 },
    /// Configure the motor amp limit, amps x10 (`^ALIM cc a`).
    SetAmpLimit { channel: u8, amps: u16 },
    /// Reload configuration from EEPROM (`%EELD`).
    LoadConfiguration,
    /// Persist the current configuration to EEPROM (`%EESAV`).
    SaveConfiguration,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::MotorPower { channel, power } => write!(f, "!G {:02} {}\r", channel, power),
            Command::EmergencyStop => f.write_str("!EX\r"),
            Command::ReleaseEmergencyStop => f.write_str("!MG\r"),
            Command::SetUserVariable { index, value } => write!(f, "!VAR {} {}\r", index, value),
            Command::SetUserBoolean { index, value } => write!(f, "!B {} {}\r", index, *value as u8),
            Command::SetEncoderPpr { channel, ppr } => write!(f, "^EPPR {:02} {}\r", channel, ppr),
            Command::SetAmpLimit { channel, amps } => write!(f, "^ALIM {:02} {}\r", channel, amps),
            Command::LoadConfiguration => f.write_str("%EELD\r"),
            Command::SaveConfiguration => f.write_str("%EESAV\r"),
        }
    }
}

impl Command {
    /// Renders the wire line into a fixed buffer.
    pub fn format_into(&self) -> Result<CommandBuffer, fmt::Error> {
        format_line(self)
    }
}

/// A request answered with a `TAG=value` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Fault flags (`?FF`).
    FaultFlags,
    /// Status flags (`?FS`).
    StatusFlags,
    /// Firmware identification string (`?FID`).
    Firmware,
    /// Applied motor power command (`?M ch`).
    MotorPower { channel: u8 },
    /// Motor amps x10 (`?A ch`).
    MotorAmps { channel: u8 },
    /// Battery amps x10 for both channels (`?BA`), answered as `BA=a:b`.
    BatteryAmps,
    /// Battery amps x10 for one channel (`?BA ch`).
    BatteryAmpsChannel { channel: u8 },
    /// Main battery voltage x10 (`?V 2`).
    BatteryVoltage,
    /// Internal (motor side) voltage x10 (`?V 1`).
    MotorVoltage,
    /// Temperature in degrees C (`?T n`): 1 is the MCU, 2 and up the channel heatsinks.
    Temperature { sensor: u8 },
    /// Encoder speed in RPM (`?S ch`).
    EncoderSpeed { channel: u8 },
    /// Encoder speed relative to the configured max RPM (`?SR ch`).
    EncoderRelativeSpeed { channel: u8 },
    /// Integer user variable (`?VAR n`).
    UserVariable { index: u8 },
    /// Boolean user variable (`?B n`).
    UserBoolean { index: u8 },
    /// Configured encoder pulses per rotation (`~EPPR ch`).
    EncoderPpr { channel: u8 },
    /// Configured amp limit x10 (`~ALIM ch`).
    AmpLimit { channel: u8 },
}

impl Query {
    /// The tag the controller prefixes its answer with (`FF` for `FF=...`).
    pub const fn tag(&self) -> &'static str {
        match self {
            Query::FaultFlags => "FF",
            Query::StatusFlags => "FS",
            Query::Firmware => "FID",
            Query::MotorPower { .. } => "M",
            Query::MotorAmps { .. } => "A",
            Query::BatteryAmps | Query::BatteryAmpsChannel { .. } => "BA",
            Query::BatteryVoltage | Query::MotorVoltage => "V",
            Query::Temperature { .. } => "T",
            Query::EncoderSpeed { .. } => "S",
            Query::EncoderRelativeSpeed { .. } => "SR",
            Query::UserVariable { .. } => "VAR",
            Query::UserBoolean { .. } => "B",
            Query::EncoderPpr { .. } => "EPPR",
            Query::AmpLimit { .. } => "ALIM",
        }
    }

    /// Renders the wire line into a fixed buffer.
    pub fn format_into(&self) -> Result<CommandBuffer, fmt::Error> {
        format_line(self)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::FaultFlags => f.write_str("?FF\r"),
            Query::StatusFlags => f.write_str("?FS\r"),
            Query::Firmware => f.write_str("?FID\r"),
            Query::MotorPower { channel } => write!(f, "?M {}\r", channel),
            Query::MotorAmps { channel } => write!(f, "?A {}\r", channel),
            Query::BatteryAmps => f.write_str("?BA\r"),
            Query::BatteryAmpsChannel { channel } => write!(f, "?BA {}\r", channel),
            Query::BatteryVoltage => f.write_str("?V 2\r"),
            Query::MotorVoltage => f.write_str("?V 1\r"),
            Query::Temperature { sensor } => write!(f, "?T {}\r", sensor),
            Query::EncoderSpeed { channel } => write!(f, "?S {}\r", channel),
            Query::EncoderRelativeSpeed { channel } => write!(f, "?SR {}\r", channel),
            Query::UserVariable { index } => write!(f, "?VAR {}\r", index),
            Query::UserBoolean { index } => write!(f, "?B {}\r", index),
            Query::EncoderPpr { channel } => write!(f, "~EPPR {}\r", channel),
            Query::AmpLimit { channel } => write!(f, "~ALIM {}\r", channel),
        }
    }
}

fn format_line<T: fmt::Display>(request: &T) -> Result<CommandBuffer, fmt::Error> {
    let mut buffer = CommandBuffer::new();
    // ArrayString reports a full buffer as fmt::Error
    write!(buffer, "{}", request)?;
    Ok(buffer)
}
