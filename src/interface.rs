//! Command/data transport framing over SPI.

use display_interface::DisplayError;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::command::InitCommand;

/// Reset-pin pulse width and settle time. The panel needs at least 10 ms
/// on each edge before it accepts commands.
const RESET_PULSE_MS: u32 = 10;

/// Transport for the ST73xx command/data bus.
///
/// Every transfer is framed by the data/command selector line: low for a
/// command byte, high for payload bytes. Chip select is owned by the
/// [`SpiDevice`], which keeps it asserted for the duration of each logical
/// transfer (single command, payload run, or full-frame burst).
pub struct DisplayInterface<SPI, DC, RST, DELAY> {
    /// SPI device
    spi: SPI,
    /// Data/Command control pin (high for data, low for command)
    dc: DC,
    /// Pin for resetting
    rst: RST,
    /// Delay provider for the mandated settle times
    pub(crate) delay: DELAY,
}

impl<SPI, DC, RST, DELAY> DisplayInterface<SPI, DC, RST, DELAY> {
    /// Create the interface from its bus parts.
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            dc,
            rst,
            delay,
        }
    }
}

impl<SPI, DC, RST, DELAY> DisplayInterface<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Hardware reset: high, pulse low, high, with a settle delay on each
    /// edge. Required before the first command after power-up.
    pub(crate) fn reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_PULSE_MS);
        Ok(())
    }

    /// Send a single command byte (DC held low).
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    /// Send payload bytes (DC held high) as one transfer.
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }

    /// Send a command followed by its payload.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        if data.is_empty() {
            return Ok(());
        }
        self.data(data)
    }

    /// Run an ordered init table: each row is a command, its payload, and
    /// the settle delay the controller mandates after it.
    pub(crate) fn run_sequence(&mut self, sequence: &[InitCommand]) -> Result<(), DisplayError> {
        for step in sequence {
            log::debug!("init command 0x{:02X} ({} payload bytes)", step.cmd, step.data.len());
            self.cmd_with_data(step.cmd, step.data)?;
            if step.delay_ms > 0 {
                self.delay.delay_ms(step.delay_ms);
            }
        }
        Ok(())
    }
}
