// src/controller/sync_controller/telemetry.rs

//! Typed queries. Each one is a fresh round trip; nothing is cached.
//!
//! Amps and volts come back as the controller's x10 fixed-point integers.

use super::SyncController;
use crate::common::{
    command::Query,
    error::RoboteqError,
    flags::{FaultFlags, StatusFlags},
    hal_traits::{RoboteqClock, RoboteqSerial},
    response::{parse, FirmwareId, ResponseParseError, Telemetry},
    RESPONSE_BUFFER_SIZE,
};

impl<IF> SyncController<IF>
where
    IF: RoboteqSerial + RoboteqClock,
{
    /// Runs `query` and decodes the reply with `decode`.
    fn query_with<T, F>(&mut self, query: Query, decode: F) -> Result<T, RoboteqError<IF::Error>>
    where
        F: FnOnce(&[u8]) -> Result<T, ResponseParseError>,
    {
        let mut buffer = [0u8; RESPONSE_BUFFER_SIZE];
        let reply = self.send_query(&query, &mut buffer)?;
        decode(reply).map_err(|e| {
            log::warn!("bad response to {:?}: {}", query, e);
            RoboteqError::BadResponse(e)
        })
    }

    fn query_int(&mut self, query: Query) -> Result<i32, RoboteqError<IF::Error>> {
        let tag = query.tag();
        self.query_with(query, |line| parse::parse_int_field(line, tag))
    }

    /// Runs any query and decodes it with the grammar of its family.
    pub fn query(&mut self, query: &Query) -> Result<Telemetry, RoboteqError<IF::Error>> {
        self.query_with(*query, |line| parse::parse_telemetry(query, line))
    }

    pub fn query_fault_flags(&mut self) -> Result<FaultFlags, RoboteqError<IF::Error>> {
        self.query_with(Query::FaultFlags, parse::parse_fault_flags)
    }

    pub fn query_status_flags(&mut self) -> Result<StatusFlags, RoboteqError<IF::Error>> {
        self.query_with(Query::StatusFlags, parse::parse_status_flags)
    }

    pub fn query_firmware(&mut self) -> Result<FirmwareId, RoboteqError<IF::Error>> {
        self.query_with(Query::Firmware, parse::parse_firmware)
    }

    /// Motor power command currently applied on `channel`, unscaled.
    pub fn query_motor_power(&mut self, channel: u8) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::MotorPower { channel })
    }

    /// Motor amps x10.
    pub fn query_motor_amps(&mut self, channel: u8) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::MotorAmps { channel })
    }

    /// Battery amps x10, summed over both channels.
    pub fn query_battery_amps(&mut self) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_with(Query::BatteryAmps, parse::parse_battery_amps_total)
    }

    /// Battery amps x10 drawn by one channel.
    pub fn query_battery_amps_channel(&mut self, channel: u8) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::BatteryAmpsChannel { channel })
    }

    /// Main battery voltage x10.
    pub fn query_battery_voltage(&mut self) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::BatteryVoltage)
    }

    /// Internal motor-side voltage x10.
    pub fn query_motor_voltage(&mut self) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::MotorVoltage)
    }

    /// MCU temperature in degrees C.
    pub fn query_internal_temp(&mut self) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::Temperature { sensor: 1 })
    }

    /// Temperature of sensor `sensor` in degrees C.
    pub fn query_temp(&mut self, sensor: u8) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::Temperature { sensor })
    }

    /// Encoder speed in RPM.
    pub fn query_encoder_speed(&mut self, channel: u8) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::EncoderSpeed { channel })
    }

    pub fn query_encoder_relative_speed(&mut self, channel: u8) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::EncoderRelativeSpeed { channel })
    }

    pub fn query_user_variable(&mut self, index: u8) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::UserVariable { index })
    }

    pub fn query_user_boolean(&mut self, index: u8) -> Result<bool, RoboteqError<IF::Error>> {
        self.query_with(Query::UserBoolean { index }, |line| parse::parse_bool_field(line, "B"))
    }

    /// Configured encoder pulses per rotation (`~EPPR`).
    pub fn get_encoder_pulse_per_rotation(&mut self, channel: u8) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::EncoderPpr { channel })
    }

    /// Configured motor amp limit x10 (`~ALIM`).
    pub fn get_motor_amp_limit(&mut self, channel: u8) -> Result<i32, RoboteqError<IF::Error>> {
        self.query_int(Query::AmpLimit { channel })
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testutils::{setup_log, MockInterface};

    fn controller(reply: &[u8]) -> SyncController<MockInterface> {
        setup_log();
        SyncController::new(MockInterface::with_reply(reply))
    }

    fn written(controller: &SyncController<MockInterface>) -> &[u8] {
        controller.interface().unwrap().written()
    }

    #[test]
    fn test_fault_flags() {
        let mut c = controller(b"FF=0\r");
        let flags = c.query_fault_flags().unwrap();
        assert!(flags.is_empty());
        assert!(!flags.overheat() && !flags.emergency_stop());
        assert_eq!(written(&c), b"?FF\r");

        let mut c = controller(b"FF=17\r");
        let flags = c.query_fault_flags().unwrap();
        assert!(flags.overheat());
        assert!(flags.emergency_stop());
        assert!(!flags.short_detected());
    }

    #[test]
    fn test_status_flags() {
        let mut c = controller(b"FS=5\r");
        let flags = c.query_status_flags().unwrap();
        assert!(flags.serial_mode());
        assert!(flags.analog_mode());
        assert!(!flags.pulse_mode());
        assert_eq!(written(&c), b"?FS\r");
    }

    #[test]
    fn test_firmware() {
        let mut c = controller(b"FID=Roboteq v2.0 HDC2460\r");
        assert_eq!(c.query_firmware().unwrap().as_str(), "Roboteq v2.0 HDC2460");
        assert_eq!(written(&c), b"?FID\r");
    }

    #[test]
    fn test_battery_amps() {
        let mut c = controller(b"BA=12:8\r");
        assert_eq!(c.query_battery_amps().unwrap(), 20);
        assert_eq!(written(&c), b"?BA\r");

        let mut c = controller(b"BA=12\r");
        assert_eq!(c.query_battery_amps_channel(2).unwrap(), 12);
        assert_eq!(written(&c), b"?BA 2\r");
    }

    #[test]
    fn test_voltages() {
        let mut c = controller(b"V=365\r");
        assert_eq!(c.query_battery_voltage().unwrap(), 365);
        assert_eq!(written(&c), b"?V 2\r");

        let mut c = controller(b"V=120\r");
        assert_eq!(c.query_motor_voltage().unwrap(), 120);
        assert_eq!(written(&c), b"?V 1\r");
    }

    #[test]
    fn test_motor_power_uses_motor_query() {
        let mut c = controller(b"M=-300\r");
        assert_eq!(c.query_motor_power(1).unwrap(), -300);
        assert_eq!(written(&c), b"?M 1\r");
    }

    #[test]
    fn test_per_channel_values() {
        let mut c = controller(b"A=55\rS=1500\rSR=-250\rT=41\rT=38\r");
        assert_eq!(c.query_motor_amps(1).unwrap(), 55);
        assert_eq!(c.query_encoder_speed(1).unwrap(), 1500);
        assert_eq!(c.query_encoder_relative_speed(1).unwrap(), -250);
        assert_eq!(c.query_internal_temp().unwrap(), 41);
        assert_eq!(c.query_temp(2).unwrap(), 38);
        assert_eq!(written(&c), b"?A 1\r?S 1\r?SR 1\r?T 1\r?T 2\r");
    }

    #[test]
    fn test_user_variables_and_config_readback() {
        let mut c = controller(b"VAR=-42\rB=1\rB=0\rEPPR=1024\rALIM=750\r");
        assert_eq!(c.query_user_variable(3).unwrap(), -42);
        assert!(c.query_user_boolean(1).unwrap());
        assert!(!c.query_user_boolean(2).unwrap());
        assert_eq!(c.get_encoder_pulse_per_rotation(1).unwrap(), 1024);
        assert_eq!(c.get_motor_amp_limit(2).unwrap(), 750);
        assert_eq!(written(&c), b"?VAR 3\r?B 1\r?B 2\r~EPPR 1\r~ALIM 2\r");
    }

    #[test]
    fn test_malformed_reply_is_bad_response() {
        let mut c = controller(b"XX\r");
        assert!(matches!(
            c.query_fault_flags(),
            Err(RoboteqError::BadResponse(ResponseParseError::TooShort))
        ));

        let mut c = controller(b"V=abc\r");
        assert!(matches!(
            c.query_battery_voltage(),
            Err(RoboteqError::BadResponse(ResponseParseError::NumericError))
        ));

        // Reply for a different query family
        let mut c = controller(b"FS=0\r");
        assert!(matches!(
            c.query_fault_flags(),
            Err(RoboteqError::BadResponse(ResponseParseError::UnexpectedTag))
        ));
    }

    #[test]
    fn test_generic_query() {
        let mut c = controller(b"BA=3:4\rFF=2\r");
        assert_eq!(c.query(&Query::BatteryAmps).unwrap(), Telemetry::Value(7));
        assert_eq!(
            c.query(&Query::FaultFlags).unwrap(),
            Telemetry::Faults(FaultFlags::from_bits_retain(2))
        );
    }

    #[test]
    fn test_every_call_is_a_fresh_round_trip() {
        let mut c = controller(b"FF=0\rFF=1\r");
        assert!(c.query_fault_flags().unwrap().is_empty());
        assert!(c.query_fault_flags().unwrap().overheat());
        assert_eq!(written(&c), b"?FF\r?FF\r");
    }
}
