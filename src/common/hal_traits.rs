// src/common/hal_traits.rs

use core::fmt::Debug;
use core::time::Duration;

use super::timing;

/// Abstraction for the monotonic millisecond clock the driver measures deadlines against.
pub trait RoboteqClock {
    /// Milliseconds since an arbitrary epoch.
    ///
    /// The counter may wrap; elapsed time is always computed with `wrapping_sub`,
    /// so a 32-bit board tick counter can be returned directly.
    fn now_ms(&self) -> u32;
}

/// Abstraction for synchronous (non-blocking) serial communication with the controller.
pub trait RoboteqSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Ok(())` if the byte was accepted for transmission, or `Err(nb::Error::WouldBlock)`
    /// if the write buffer is full. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have been sent.
    ///
    /// Returns `Ok(())` if the flush completed, or `Err(nb::Error::WouldBlock)` if
    /// transmission is still in progress.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}

// Lets a controller borrow an interface instead of owning it.
impl<T: RoboteqSerial + ?Sized> RoboteqSerial for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        (**self).write_byte(byte)
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        (**self).flush()
    }
}

impl<T: RoboteqClock + ?Sized> RoboteqClock for &mut T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed on `clock` since `start`, rollover safe.
#[inline]
pub fn elapsed_ms<C: RoboteqClock + ?Sized>(clock: &C, start: u32) -> u32 {
    clock.now_ms().wrapping_sub(start)
}

/// A timeout that started running at a fixed instant.
///
/// One deadline is shared by every step of a round trip (write, flush and
/// read), so the whole exchange is bounded by the timeout rather than each step.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Deadline {
    start: u32,
    budget_ms: u32,
}

impl Deadline {
    /// Starts `timeout` running from the current reading of `clock`.
    pub fn start<C: RoboteqClock + ?Sized>(clock: &C, timeout: Duration) -> Self {
        Deadline {
            start: clock.now_ms(),
            budget_ms: timing::as_millis_u32(timeout),
        }
    }

    #[inline]
    pub fn budget_ms(&self) -> u32 {
        self.budget_ms
    }

    #[inline]
    pub fn has_expired<C: RoboteqClock + ?Sized>(&self, clock: &C) -> bool {
        elapsed_ms(clock, self.start) >= self.budget_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct WrappingClock(Cell<u32>);
    impl RoboteqClock for WrappingClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    #[test]
    fn test_elapsed_survives_rollover() {
        let clock = WrappingClock(Cell::new(u32::MAX - 4));
        let start = clock.now_ms();
        clock.0.set(5);
        assert_eq!(elapsed_ms(&clock, start), 10);
    }

    #[test]
    fn test_deadline_measured_from_start() {
        let clock = WrappingClock(Cell::new(100));
        let deadline = Deadline::start(&clock, Duration::from_millis(20));
        clock.0.set(119);
        assert!(!deadline.has_expired(&clock));
        clock.0.set(120);
        assert!(deadline.has_expired(&clock));
    }

    #[test]
    fn test_deadline_across_rollover() {
        let clock = WrappingClock(Cell::new(u32::MAX - 2));
        let deadline = Deadline::start(&clock, Duration::from_millis(10));
        clock.0.set(5);
        assert!(!deadline.has_expired(&clock));
        clock.0.set(7);
        assert!(deadline.has_expired(&clock));
    }

    #[test]
    fn test_zero_deadline_is_already_expired() {
        let clock = WrappingClock(Cell::new(7));
        assert!(Deadline::start(&clock, Duration::ZERO).has_expired(&clock));
    }

    #[test]
    fn test_borrowed_clock_delegates() {
        let mut clock = WrappingClock(Cell::new(42));
        let borrowed = &mut clock;
        assert_eq!(RoboteqClock::now_ms(&borrowed), 42);
    }
}
