//! Recording mock transport for protocol-conformance tests.
//!
//! One shared [`Bus`] backs a mock SPI device, the DC and RST pins, and
//! the delay provider, so tests can reconstruct the exact (command,
//! payload) stream a driver issued, the reset-pin edges, and the settle
//! delays it requested, without hardware.

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};

/// Error type for the mocks; never actually produced.
#[derive(Debug)]
pub struct MockError;

impl spi::Error for MockError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

impl digital::Error for MockError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

#[derive(Default)]
struct BusState {
    dc_high: bool,
    /// (data mode, bytes) per SPI write, in issue order.
    writes: Vec<(bool, Vec<u8>)>,
    rst_levels: Vec<bool>,
    delays_ms: Vec<u32>,
}

/// Shared recording state behind all mock endpoints.
#[derive(Clone, Default)]
pub struct Bus(Rc<RefCell<BusState>>);

impl Bus {
    pub fn new() -> Self {
        Bus::default()
    }

    /// Raw SPI writes as (data mode, bytes).
    pub fn writes(&self) -> Vec<(bool, Vec<u8>)> {
        self.0.borrow().writes.clone()
    }

    /// Reset-pin levels in the order they were driven.
    pub fn rst_levels(&self) -> Vec<bool> {
        self.0.borrow().rst_levels.clone()
    }

    /// Millisecond delays requested, in order.
    pub fn delays_ms(&self) -> Vec<u32> {
        self.0.borrow().delays_ms.clone()
    }

    /// Reconstruct (command, payload) pairs from the DC-line framing:
    /// every command-mode byte opens a new pair, data-mode bytes extend
    /// the payload of the most recent command.
    pub fn commands(&self) -> Vec<(u8, Vec<u8>)> {
        let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
        for (data_mode, bytes) in self.0.borrow().writes.iter() {
            if *data_mode {
                if let Some((_, payload)) = out.last_mut() {
                    payload.extend_from_slice(bytes);
                }
            } else {
                for &b in bytes {
                    out.push((b, Vec::new()));
                }
            }
        }
        out
    }

    /// Drop everything recorded so far; lets a test focus on the commands
    /// issued after setup.
    pub fn reset_recording(&self) {
        let mut st = self.0.borrow_mut();
        st.writes.clear();
        st.rst_levels.clear();
        st.delays_ms.clear();
    }
}

/// Mock SPI device recording writes with the current DC level.
pub struct MockSpi(Bus);

impl MockSpi {
    pub fn new(bus: &Bus) -> Self {
        MockSpi(bus.clone())
    }
}

impl spi::ErrorType for MockSpi {
    type Error = MockError;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), MockError> {
        let mut st = self.0 .0.borrow_mut();
        let data_mode = st.dc_high;
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                st.writes.push((data_mode, bytes.to_vec()));
            }
        }
        Ok(())
    }
}

/// Mock data/command selector pin.
pub struct DcPin(Bus);

impl DcPin {
    pub fn new(bus: &Bus) -> Self {
        DcPin(bus.clone())
    }
}

impl digital::ErrorType for DcPin {
    type Error = MockError;
}

impl OutputPin for DcPin {
    fn set_low(&mut self) -> Result<(), MockError> {
        self.0 .0.borrow_mut().dc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        self.0 .0.borrow_mut().dc_high = true;
        Ok(())
    }
}

/// Mock reset pin recording every level driven.
pub struct RstPin(Bus);

impl RstPin {
    pub fn new(bus: &Bus) -> Self {
        RstPin(bus.clone())
    }
}

impl digital::ErrorType for RstPin {
    type Error = MockError;
}

impl OutputPin for RstPin {
    fn set_low(&mut self) -> Result<(), MockError> {
        self.0 .0.borrow_mut().rst_levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        self.0 .0.borrow_mut().rst_levels.push(true);
        Ok(())
    }
}

/// Delay provider that records requested milliseconds and returns
/// immediately. Sub-millisecond requests are dropped.
pub struct MockDelay(Bus);

impl MockDelay {
    pub fn new(bus: &Bus) -> Self {
        MockDelay(bus.clone())
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        let ms = ns / 1_000_000;
        if ms > 0 {
            self.0 .0.borrow_mut().delays_ms.push(ms);
        }
    }
}
