// src/common/testutils.rs
//
// Scripted serial interface shared by the unit tests.

use core::cell::Cell;
use std::sync::Once;

use heapless::{Deque, Vec};

use super::hal_traits::{RoboteqClock, RoboteqSerial};

static INIT: Once = Once::new();

pub fn setup_log() {
    INIT.call_once(|| {
        // Another test binary may already own the global logger
        let _ = simple_logger::SimpleLogger::new()
            .with_level(log::LevelFilter::Debug)
            .init();
    });
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockCommError;

/// Serial line plus clock. Every call to `now_ms` advances time by `tick_ms`,
/// so polling loops always make progress towards their deadline.
pub struct MockInterface {
    pub read_queue: Deque<u8, 256>,
    pub write_log: Vec<u8, 256>,
    pub flush_count: usize,
    pub read_polls: usize,
    pub fail_read: bool,
    pub fail_write: bool,
    /// Each written byte is refused with `WouldBlock` this many times first.
    pub stall_writes: usize,
    stalled: usize,
    now: Cell<u32>,
    tick_ms: u32,
}

impl MockInterface {
    pub fn new() -> Self {
        MockInterface {
            read_queue: Deque::new(),
            write_log: Vec::new(),
            flush_count: 0,
            read_polls: 0,
            fail_read: false,
            fail_write: false,
            stall_writes: 0,
            stalled: 0,
            now: Cell::new(0),
            tick_ms: 1,
        }
    }

    pub fn with_reply(data: &[u8]) -> Self {
        let mut mock = Self::new();
        mock.stage_read_data(data);
        mock
    }

    pub fn start_at(mut self, ms: u32) -> Self {
        self.now.set(ms);
        self
    }

    pub fn stage_read_data(&mut self, data: &[u8]) {
        for byte in data {
            assert!(self.read_queue.push_back(*byte).is_ok(), "read queue full");
        }
    }

    pub fn current_ms(&self) -> u32 {
        self.now.get()
    }

    pub fn written(&self) -> &[u8] {
        &self.write_log
    }
}

impl RoboteqClock for MockInterface {
    fn now_ms(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.tick_ms));
        now
    }
}

impl RoboteqSerial for MockInterface {
    type Error = MockCommError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.read_polls += 1;
        if self.fail_read {
            return Err(nb::Error::Other(MockCommError));
        }
        self.read_queue.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.fail_write {
            return Err(nb::Error::Other(MockCommError));
        }
        if self.stalled < self.stall_writes {
            self.stalled += 1;
            return Err(nb::Error::WouldBlock);
        }
        self.stalled = 0;
        self.write_log.push(byte).map_err(|_| nb::Error::Other(MockCommError))
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.flush_count += 1;
        Ok(())
    }
}
