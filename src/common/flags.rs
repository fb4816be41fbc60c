// src/common/flags.rs

use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// Snapshot of the controller's fault register as returned by `?FF`.
    ///
    /// Each bit is an independent fault. Values are never cached; query again to refresh.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct FaultFlags: u8 {
        const OVERHEAT = 0x01;
        const OVERVOLTAGE = 0x02;
        const UNDERVOLTAGE = 0x04;
        const SHORT = 0x08;
        const EMERGENCY_STOP = 0x10;
        /// Brushless sensor or script fault.
        const SCRIPT_FAULT = 0x20;
        const MOSFET_FAILURE = 0x40;
        /// Default configuration loaded at startup.
        const CONFIG_FAULT = 0x80;
    }
}

bitflags! {
    /// Snapshot of the controller's status register as returned by `?FS`.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct StatusFlags: u8 {
        const SERIAL_MODE = 0x01;
        const PULSE_MODE = 0x02;
        const ANALOG_MODE = 0x04;
        const POWER_OFF = 0x08;
        const STALL = 0x10;
        const AT_LIMIT = 0x20;
        // 0x40 is unused by the firmware and kept as an unnamed bit.
        const SCRIPT_RUNNING = 0x80;
    }
}

/// Tests bit `n` (0 = least significant) of a raw register. Bits past 7 read as clear.
#[inline]
const fn bit_set(bits: u8, n: u8) -> bool {
    n < 8 && bits & (1 << n) != 0
}

impl FaultFlags {
    #[inline]
    pub const fn is_set(&self, n: u8) -> bool {
        bit_set(self.bits(), n)
    }

    pub const fn overheat(&self) -> bool { self.contains(Self::OVERHEAT) }
    pub const fn overvoltage(&self) -> bool { self.contains(Self::OVERVOLTAGE) }
    pub const fn undervoltage(&self) -> bool { self.contains(Self::UNDERVOLTAGE) }
    pub const fn short_detected(&self) -> bool { self.contains(Self::SHORT) }
    pub const fn emergency_stop(&self) -> bool { self.contains(Self::EMERGENCY_STOP) }
    pub const fn script_fault(&self) -> bool { self.contains(Self::SCRIPT_FAULT) }
    pub const fn mosfet_failure(&self) -> bool { self.contains(Self::MOSFET_FAILURE) }
    pub const fn config_fault(&self) -> bool { self.contains(Self::CONFIG_FAULT) }
}

impl StatusFlags {
    #[inline]
    pub const fn is_set(&self, n: u8) -> bool {
        bit_set(self.bits(), n)
    }

    pub const fn serial_mode(&self) -> bool { self.contains(Self::SERIAL_MODE) }
    pub const fn pulse_mode(&self) -> bool { self.contains(Self::PULSE_MODE) }
    pub const fn analog_mode(&self) -> bool { self.contains(Self::ANALOG_MODE) }
    pub const fn power_stage_off(&self) -> bool { self.contains(Self::POWER_OFF) }
    pub const fn stall_detected(&self) -> bool { self.contains(Self::STALL) }
    pub const fn at_limit(&self) -> bool { self.contains(Self::AT_LIMIT) }
    pub const fn script_running(&self) -> bool { self.contains(Self::SCRIPT_RUNNING) }
}

// Registers arrive as raw bytes; undocumented bits are kept, not dropped.
impl From<u8> for FaultFlags {
    fn from(bits: u8) -> Self {
        FaultFlags::from_bits_retain(bits)
    }
}

impl From<u8> for StatusFlags {
    fn from(bits: u8) -> Self {
        StatusFlags::from_bits_retain(bits)
    }
}

/// `A | B` for the set flags, unnamed bits as hex, or `none`.
fn write_flags<B>(f: &mut fmt::Formatter<'_>, flags: &B) -> fmt::Result
where
    B: bitflags::Flags,
    B::Bits: bitflags::parser::WriteHex,
{
    if flags.is_empty() {
        return f.write_str("none");
    }
    bitflags::parser::to_writer(flags, f)
}

impl fmt::Display for FaultFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flags(f, self)
    }
}

impl fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flags(f, self)
    }
}
