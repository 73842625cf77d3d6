//! ST7305 driver: 1-bit monochrome memory LCD, 168 × 384.

use core::convert::Infallible;

use display_interface::DisplayError;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::command::{Cmd, InitCommand};
use crate::framebuffer::MonoFrameBuffer;
use crate::graphics::PixelSink;
use crate::interface::DisplayInterface;
use crate::power::PowerState;
use crate::rotation::Rotation;

/// Panel width in pixels.
pub const WIDTH: u16 = MonoFrameBuffer::WIDTH;
/// Panel height in pixels.
pub const HEIGHT: u16 = MonoFrameBuffer::HEIGHT;

/// Post-delay after forcing high power mode on the way into sleep.
const HPM_SETTLE_MS: u32 = 300;
/// Post-delay after sleep-in.
const SLEEP_IN_MS: u32 = 100;
/// Post-delay after sleep-out.
const SLEEP_OUT_MS: u32 = 120;

/// Column address window: 14 column groups of 3 bytes cover the 42-byte
/// buffer rows.
const COLUMN_WINDOW: [u8; 2] = [0x17, 0x24];
/// Row address window: 192 buffer rows.
const ROW_WINDOW: [u8; 2] = [0x00, 0xBF];

/// Bring-up table; order and payloads follow the panel vendor sequence.
const INIT_SEQUENCE: &[InitCommand] = &[
    InitCommand { cmd: Cmd::NVM_LOAD, data: &[0x17, 0x02], delay_ms: 0 },
    InitCommand { cmd: Cmd::BOOSTER_ENABLE, data: &[0x01], delay_ms: 0 },
    // VGH 17V, VGL -10V
    InitCommand { cmd: Cmd::GATE_VOLTAGE, data: &[0x12, 0x0A], delay_ms: 0 },
    InitCommand { cmd: Cmd::VSHP_SETTING, data: &[0x3C, 0x3E, 0x3C, 0x3C], delay_ms: 0 },
    InitCommand { cmd: Cmd::VSLP_SETTING, data: &[0x23, 0x21, 0x23, 0x23], delay_ms: 0 },
    InitCommand { cmd: Cmd::VSHN_SETTING, data: &[0x5A, 0x5C, 0x5A, 0x5A], delay_ms: 0 },
    InitCommand { cmd: Cmd::VSLN_SETTING, data: &[0x37, 0x35, 0x37, 0x37], delay_ms: 0 },
    InitCommand { cmd: Cmd::OSC_SETTING, data: &[0xA6, 0xE9], delay_ms: 0 },
    // HPM 32 Hz, LPM 1 Hz
    InitCommand { cmd: Cmd::FRAME_RATE, data: &[0x12], delay_ms: 0 },
    InitCommand {
        cmd: Cmd::GATE_EQ_HPM,
        data: &[0xE5, 0xF6, 0x17, 0x77, 0x77, 0x77, 0x77, 0x77, 0x77, 0x71],
        delay_ms: 0,
    },
    InitCommand {
        cmd: Cmd::GATE_EQ_LPM,
        data: &[0x05, 0x46, 0x77, 0x77, 0x77, 0x77, 0x76, 0x45],
        delay_ms: 0,
    },
    InitCommand { cmd: Cmd::GATE_TIMING, data: &[0x32, 0x03, 0x1F], delay_ms: 0 },
    InitCommand { cmd: Cmd::SOURCE_EQ, data: &[0x13], delay_ms: 0 },
    // 384 lines = 96 * 4
    InitCommand { cmd: Cmd::GATE_LINE, data: &[0x60], delay_ms: 0 },
    InitCommand { cmd: Cmd::SLEEP_OUT, data: &[], delay_ms: SLEEP_OUT_MS },
    // VSHP1 / VSLP1 / VSHN1 / VSLN1
    InitCommand { cmd: Cmd::SOURCE_VOLTAGE, data: &[0x00], delay_ms: 0 },
    // MX=1, DO=1
    InitCommand { cmd: Cmd::MEMORY_ACCESS, data: &[0x48], delay_ms: 0 },
    // 3-byte writes, 24 bit
    InitCommand { cmd: Cmd::DATA_FORMAT, data: &[0x11], delay_ms: 0 },
    // Mono
    InitCommand { cmd: Cmd::GAMMA_MODE, data: &[0x20], delay_ms: 0 },
    // 1-dot inversion, frame inversion, one-line interlace
    InitCommand { cmd: Cmd::PANEL_SETTING, data: &[0x09], delay_ms: 0 },
    InitCommand { cmd: Cmd::COLUMN_ADDRESS, data: &COLUMN_WINDOW, delay_ms: 0 },
    InitCommand { cmd: Cmd::ROW_ADDRESS, data: &ROW_WINDOW, delay_ms: 0 },
    InitCommand { cmd: Cmd::TE_MODE, data: &[0x00], delay_ms: 0 },
    InitCommand { cmd: Cmd::AUTO_POWER_DOWN, data: &[0xFF], delay_ms: 0 },
    InitCommand { cmd: Cmd::HIGH_POWER_MODE, data: &[], delay_ms: 0 },
    InitCommand { cmd: Cmd::DISPLAY_ON, data: &[], delay_ms: 0 },
    InitCommand { cmd: Cmd::INVERSION_OFF, data: &[], delay_ms: 0 },
    // Clear RAM to zero on the panel side
    InitCommand { cmd: Cmd::CLEAR_RAM, data: &[0x4F], delay_ms: 0 },
];

/// ST7305 memory-LCD driver.
///
/// Owns the packed framebuffer; all drawing mutates the buffer only, and
/// [`display`](Self::display) flushes the whole frame in one burst.
///
/// ## Type parameters
///
/// - `SPI` - SPI device for communication (owns chip select)
/// - `DC` - data/command selector pin
/// - `RST` - reset output pin
/// - `DELAY` - delay provider for the mandated settle times
pub struct St7305<SPI, DC, RST, DELAY> {
    interface: DisplayInterface<SPI, DC, RST, DELAY>,
    buffer: MonoFrameBuffer,
    power: PowerState,
    rotation: Rotation,
}

impl<SPI, DC, RST, DELAY> St7305<SPI, DC, RST, DELAY> {
    /// Create the driver with a zeroed framebuffer. No command is issued
    /// until [`initialize`](Self::initialize) runs.
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: DELAY) -> Self {
        St7305 {
            interface: DisplayInterface::new(spi, dc, rst, delay),
            buffer: MonoFrameBuffer::new(),
            power: PowerState::Uninitialized,
            rotation: Rotation::Deg0,
        }
    }

    /// Write one pixel in the rotation-aware logical space. Out-of-panel
    /// coordinates are silently dropped.
    pub fn draw_pixel(&mut self, x: u16, y: u16, on: bool) {
        let (px, py) = self.rotation.transform(x, y, WIDTH, HEIGHT);
        self.buffer.set_pixel(px, py, on);
    }

    /// Read back one pixel in the rotation-aware logical space.
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        let (px, py) = self.rotation.transform(x, y, WIDTH, HEIGHT);
        self.buffer.pixel(px, py)
    }

    /// Set every pixel off.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Alias for [`clear`](Self::clear).
    pub fn clear_display(&mut self) {
        self.clear();
    }

    /// Overwrite the whole buffer with one byte value.
    pub fn fill(&mut self, value: u8) {
        self.buffer.fill(value);
    }

    /// Store a rotation setting; only the low two bits are used.
    pub fn set_rotation(&mut self, r: u8) {
        self.rotation = Rotation::from_index(r);
    }

    /// Current rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Current power-mode state.
    pub fn power_state(&self) -> PowerState {
        self.power
    }

    /// The packed framebuffer bytes as they would go over the bus.
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_bytes()
    }
}

impl<SPI, DC, RST, DELAY> St7305<SPI, DC, RST, DELAY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Hardware reset followed by the full bring-up table. Ends in high
    /// power mode with the display on.
    pub fn initialize(&mut self) -> Result<(), DisplayError> {
        log::info!("initializing ST7305 panel ({}x{})", WIDTH, HEIGHT);
        self.interface.reset()?;
        self.interface.run_sequence(INIT_SEQUENCE)?;
        self.power = PowerState::HighPower;
        Ok(())
    }

    fn set_address_window(&mut self) -> Result<(), DisplayError> {
        self.interface.cmd_with_data(Cmd::COLUMN_ADDRESS, &COLUMN_WINDOW)?;
        self.interface.cmd_with_data(Cmd::ROW_ADDRESS, &ROW_WINDOW)
    }

    /// Flush the framebuffer to the panel as one data burst.
    pub fn display(&mut self) -> Result<(), DisplayError> {
        log::debug!("flushing {} bytes to panel", MonoFrameBuffer::LEN);
        self.set_address_window()?;
        self.interface.cmd(Cmd::RAM_WRITE)?;
        self.interface.data(self.buffer.as_bytes())
    }

    /// Switch to high power mode; a no-op when already there.
    pub fn high_power_mode(&mut self) -> Result<(), DisplayError> {
        if self.power == PowerState::HighPower {
            return Ok(());
        }
        self.interface.cmd(Cmd::HIGH_POWER_MODE)?;
        self.power = PowerState::HighPower;
        Ok(())
    }

    /// Switch to low power mode; a no-op when already there.
    pub fn low_power_mode(&mut self) -> Result<(), DisplayError> {
        if self.power == PowerState::LowPower {
            return Ok(());
        }
        self.interface.cmd(Cmd::LOW_POWER_MODE)?;
        self.power = PowerState::LowPower;
        Ok(())
    }

    /// Enter or leave sleep.
    ///
    /// Sleep may only be entered from high power mode: coming from low
    /// power, the driver forces HPM first and waits for it to settle.
    /// Skipping that step or the post-delays risks a non-responsive panel.
    pub fn display_sleep(&mut self, enabled: bool) -> Result<(), DisplayError> {
        if enabled {
            if self.power == PowerState::LowPower {
                self.interface.cmd(Cmd::HIGH_POWER_MODE)?;
                self.interface.delay.delay_ms(HPM_SETTLE_MS);
                self.power = PowerState::HighPower;
            }
            log::info!("panel entering sleep");
            self.interface.cmd(Cmd::SLEEP_IN)?;
            self.interface.delay.delay_ms(SLEEP_IN_MS);
            self.power = PowerState::Sleeping;
        } else {
            log::info!("panel waking from sleep");
            self.interface.cmd(Cmd::SLEEP_OUT)?;
            self.interface.delay.delay_ms(SLEEP_OUT_MS);
            self.power = PowerState::HighPower;
        }
        Ok(())
    }

    /// Turn the display output on or off. Always legal.
    pub fn display_on(&mut self, enabled: bool) -> Result<(), DisplayError> {
        self.interface
            .cmd(if enabled { Cmd::DISPLAY_ON } else { Cmd::DISPLAY_OFF })
    }

    /// Toggle display inversion. Always legal.
    pub fn display_inversion(&mut self, enabled: bool) -> Result<(), DisplayError> {
        self.interface
            .cmd(if enabled { Cmd::INVERSION_ON } else { Cmd::INVERSION_OFF })
    }
}

impl<SPI, DC, RST, DELAY> PixelSink for St7305<SPI, DC, RST, DELAY> {
    fn write_pixel(&mut self, x: i32, y: i32, on: bool) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        self.draw_pixel(x, y, on);
    }
}

impl<SPI, DC, RST, DELAY> OriginDimensions for St7305<SPI, DC, RST, DELAY> {
    fn size(&self) -> Size {
        match self.rotation {
            Rotation::Deg90 | Rotation::Deg270 => Size::new(HEIGHT.into(), WIDTH.into()),
            _ => Size::new(WIDTH.into(), HEIGHT.into()),
        }
    }
}

impl<SPI, DC, RST, DELAY> DrawTarget for St7305<SPI, DC, RST, DELAY> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.write_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Bus, DcPin, MockDelay, MockSpi, RstPin};

    fn make_driver() -> (St7305<MockSpi, DcPin, RstPin, MockDelay>, Bus) {
        let bus = Bus::new();
        let driver = St7305::new(
            MockSpi::new(&bus),
            DcPin::new(&bus),
            RstPin::new(&bus),
            MockDelay::new(&bus),
        );
        (driver, bus)
    }

    #[test]
    fn initialize_issues_the_table_in_order() {
        let (mut d, bus) = make_driver();
        assert_eq!(d.power_state(), PowerState::Uninitialized);
        d.initialize().unwrap();

        let expected: Vec<(u8, Vec<u8>)> = INIT_SEQUENCE
            .iter()
            .map(|step| (step.cmd, step.data.to_vec()))
            .collect();
        assert_eq!(bus.commands(), expected);
        assert_eq!(bus.rst_levels(), vec![true, false, true]);
        // Reset settles plus the sleep-out settle.
        assert_eq!(bus.delays_ms(), vec![10, 10, 10, 120]);
        assert_eq!(d.power_state(), PowerState::HighPower);
    }

    #[test]
    fn display_streams_the_whole_buffer_after_the_window() {
        let (mut d, bus) = make_driver();
        d.clear();
        d.display().unwrap();

        let cmds = bus.commands();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[0], (Cmd::COLUMN_ADDRESS, vec![0x17, 0x24]));
        assert_eq!(cmds[1], (Cmd::ROW_ADDRESS, vec![0x00, 0xBF]));
        assert_eq!(cmds[2].0, Cmd::RAM_WRITE);
        assert_eq!(cmds[2].1.len(), 8064);
        assert!(cmds[2].1.iter().all(|&b| b == 0));
    }

    #[test]
    fn origin_pixel_sets_bit_seven_of_byte_zero() {
        let (mut d, _) = make_driver();
        d.draw_pixel(0, 0, true);
        assert_eq!(d.buffer()[0], 0x80);
    }

    #[test]
    fn rotated_origin_maps_to_physical_167_0() {
        let (mut d, _) = make_driver();
        d.set_rotation(1);
        d.draw_pixel(0, 0, true);
        // Physical (167, 0): byte (0/2)*42 + 167/4 = 41, bit 7-(3*2) = 1.
        assert_eq!(d.buffer()[41], 0b0000_0010);
    }

    #[test]
    fn logical_readback_roundtrips_under_every_rotation() {
        for r in 0..4 {
            let (mut d, _) = make_driver();
            d.set_rotation(r);
            d.draw_pixel(5, 7, true);
            assert!(d.pixel(5, 7), "lost pixel at rotation {r}");
            d.draw_pixel(5, 7, false);
            assert!(!d.pixel(5, 7));
        }
    }

    #[test]
    fn fill_then_readback() {
        let (mut d, _) = make_driver();
        d.fill(0xFF);
        assert!(d.pixel(0, 0));
        assert!(d.pixel(167, 383));
        d.fill(0x00);
        assert!(!d.pixel(83, 200));
    }

    #[test]
    fn power_mode_switches_are_idempotent() {
        let (mut d, bus) = make_driver();
        d.initialize().unwrap();
        bus.reset_recording();

        d.high_power_mode().unwrap();
        assert!(bus.commands().is_empty(), "redundant HPM was sent");

        d.low_power_mode().unwrap();
        d.low_power_mode().unwrap();
        assert_eq!(bus.commands(), vec![(Cmd::LOW_POWER_MODE, vec![])]);
        assert_eq!(d.power_state(), PowerState::LowPower);
    }

    #[test]
    fn sleep_from_low_power_forces_hpm_first() {
        let (mut d, bus) = make_driver();
        d.initialize().unwrap();
        d.low_power_mode().unwrap();
        bus.reset_recording();

        d.display_sleep(true).unwrap();
        assert_eq!(
            bus.commands(),
            vec![(Cmd::HIGH_POWER_MODE, vec![]), (Cmd::SLEEP_IN, vec![])]
        );
        assert_eq!(bus.delays_ms(), vec![300, 100]);
        assert_eq!(d.power_state(), PowerState::Sleeping);

        bus.reset_recording();
        d.display_sleep(false).unwrap();
        assert_eq!(bus.commands(), vec![(Cmd::SLEEP_OUT, vec![])]);
        assert_eq!(bus.delays_ms(), vec![120]);
        assert_eq!(d.power_state(), PowerState::HighPower);
    }

    #[test]
    fn sleep_from_high_power_skips_the_mode_switch() {
        let (mut d, bus) = make_driver();
        d.initialize().unwrap();
        bus.reset_recording();

        d.display_sleep(true).unwrap();
        assert_eq!(bus.commands(), vec![(Cmd::SLEEP_IN, vec![])]);
    }

    #[test]
    fn display_and_inversion_toggles() {
        let (mut d, bus) = make_driver();
        d.display_on(false).unwrap();
        d.display_on(true).unwrap();
        d.display_inversion(true).unwrap();
        d.display_inversion(false).unwrap();
        assert_eq!(
            bus.commands(),
            vec![
                (Cmd::DISPLAY_OFF, vec![]),
                (Cmd::DISPLAY_ON, vec![]),
                (Cmd::INVERSION_ON, vec![]),
                (Cmd::INVERSION_OFF, vec![]),
            ]
        );
    }

    #[test]
    fn out_of_panel_writes_are_dropped() {
        let (mut d, _) = make_driver();
        d.draw_pixel(WIDTH, 0, true);
        d.draw_pixel(0, HEIGHT, true);
        d.write_pixel(-1, -1, true);
        assert!(d.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn draw_target_reports_rotated_dimensions() {
        let (mut d, _) = make_driver();
        assert_eq!(d.size(), Size::new(168, 384));
        d.set_rotation(1);
        assert_eq!(d.size(), Size::new(384, 168));

        embedded_graphics::Pixel(Point::new(0, 0), BinaryColor::On)
            .draw(&mut d)
            .unwrap();
        assert!(d.pixel(0, 0));
    }
}
