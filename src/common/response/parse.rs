// src/common/response/parse.rs

//! Decoders for `TAG=value` reply lines.
//!
//! Every function takes the raw line exactly as the reader returned it,
//! terminator included. Nothing here trusts the controller: lengths are
//! checked before slicing and numbers go through `i32::from_str`.

use super::error::ResponseParseError;
use super::{FirmwareId, Telemetry};

use crate::common::command::Query;
use crate::common::flags::{FaultFlags, StatusFlags};
use crate::common::timing::TERMINATOR;

use core::str::{self, FromStr};

// --- Internal Helpers ---

/// Smallest well-formed line for `tag`: the tag, `=`, one character and the terminator.
#[inline]
const fn min_line_len(tag: &str) -> usize {
    tag.len() + 3
}

/// Checks length and terminator, strips `TAG=` and the `\r`, and returns what is left.
fn field<'a>(line: &'a [u8], tag: &str) -> Result<&'a [u8], ResponseParseError> {
    if line.len() < min_line_len(tag) {
        return Err(ResponseParseError::TooShort);
    }
    let body = line.strip_suffix(&[TERMINATOR]).ok_or(ResponseParseError::MissingTerminator)?;
    let value = body
        .strip_prefix(tag.as_bytes())
        .and_then(|rest| rest.strip_prefix(b"="))
        .ok_or(ResponseParseError::UnexpectedTag)?;
    if value.is_empty() {
        return Err(ResponseParseError::TooShort);
    }
    Ok(value)
}

/// Decimal integer with optional sign. Whitespace, hex and trailing junk are rejected.
fn int(bytes: &[u8]) -> Result<i32, ResponseParseError> {
    let text = str::from_utf8(bytes)?;
    Ok(i32::from_str(text)?)
}

// --- Public Parsing Functions ---

/// `TAG=<int>\r`
pub fn parse_int_field(line: &[u8], tag: &str) -> Result<i32, ResponseParseError> {
    int(field(line, tag)?)
}

/// `TAG=<int>:<int>\r`
pub fn parse_int_pair(line: &[u8], tag: &str) -> Result<(i32, i32), ResponseParseError> {
    let value = field(line, tag)?;
    let split = value
        .iter()
        .position(|b| *b == b':')
        .ok_or(ResponseParseError::NumericError)?;
    let (first, second) = (&value[..split], &value[split + 1..]);
    Ok((int(first)?, int(second)?))
}

/// `TAG=<text>\r`, text returned verbatim.
pub fn parse_text_field<'a>(line: &'a [u8], tag: &str) -> Result<&'a str, ResponseParseError> {
    Ok(str::from_utf8(field(line, tag)?)?)
}

/// `FF=<mask>\r`
pub fn parse_fault_flags(line: &[u8]) -> Result<FaultFlags, ResponseParseError> {
    let mask = parse_int_field(line, "FF")?;
    Ok(FaultFlags::from_bits_retain(u8::try_from(mask)?))
}

/// `FS=<mask>\r`
pub fn parse_status_flags(line: &[u8]) -> Result<StatusFlags, ResponseParseError> {
    let mask = parse_int_field(line, "FS")?;
    Ok(StatusFlags::from_bits_retain(u8::try_from(mask)?))
}

/// `FID=<text>\r`
pub fn parse_firmware(line: &[u8]) -> Result<FirmwareId, ResponseParseError> {
    let text = parse_text_field(line, "FID")?;
    // A line that fit the read buffer always fits FirmwareId
    FirmwareId::try_from(text).map_err(|_| ResponseParseError::OutOfRange)
}

/// `BA=<ch1>:<ch2>\r`, returned as the total of both channels (amps x10).
pub fn parse_battery_amps_total(line: &[u8]) -> Result<i32, ResponseParseError> {
    let (ch1, ch2) = parse_int_pair(line, "BA")?;
    ch1.checked_add(ch2).ok_or(ResponseParseError::OutOfRange)
}

/// `TAG=<0|n>\r` as a boolean; any non-zero value is `true`.
pub fn parse_bool_field(line: &[u8], tag: &str) -> Result<bool, ResponseParseError> {
    Ok(parse_int_field(line, tag)? != 0)
}

/// Decodes the reply to `query` with the grammar that query family uses.
pub fn parse_telemetry(query: &Query, line: &[u8]) -> Result<Telemetry, ResponseParseError> {
    match query {
        Query::FaultFlags => parse_fault_flags(line).map(Telemetry::Faults),
        Query::StatusFlags => parse_status_flags(line).map(Telemetry::Status),
        Query::Firmware => parse_firmware(line).map(Telemetry::Firmware),
        Query::BatteryAmps => parse_battery_amps_total(line).map(Telemetry::Value),
        Query::UserBoolean { .. } => parse_bool_field(line, query.tag()).map(Telemetry::Flag),
        _ => parse_int_field(line, query.tag()).map(Telemetry::Value),
    }
}
