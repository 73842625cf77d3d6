//! ST73xx command set and the declarative init-table row.

/// Command bytes shared by the ST7305 and ST7306 controllers.
pub struct Cmd;

#[allow(missing_docs)]
impl Cmd {
    // Power / lifecycle
    pub const SLEEP_IN: u8 = 0x10;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const HIGH_POWER_MODE: u8 = 0x38;
    pub const LOW_POWER_MODE: u8 = 0x39;

    // Display toggles
    pub const INVERSION_OFF: u8 = 0x20;
    pub const INVERSION_ON: u8 = 0x21;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;

    // Memory window and writes
    pub const COLUMN_ADDRESS: u8 = 0x2A;
    pub const ROW_ADDRESS: u8 = 0x2B;
    pub const RAM_WRITE: u8 = 0x2C;

    // Panel configuration
    pub const TE_MODE: u8 = 0x35;
    pub const MEMORY_ACCESS: u8 = 0x36;
    pub const DATA_FORMAT: u8 = 0x3A;
    pub const GATE_TIMING: u8 = 0x62;
    pub const GATE_LINE: u8 = 0xB0;
    pub const FRAME_RATE: u8 = 0xB2;
    pub const GATE_EQ_HPM: u8 = 0xB3;
    pub const GATE_EQ_LPM: u8 = 0xB4;
    pub const SOURCE_EQ: u8 = 0xB7;
    pub const PANEL_SETTING: u8 = 0xB8;
    pub const GAMMA_MODE: u8 = 0xB9;
    pub const CLEAR_RAM: u8 = 0xBB;

    // Voltage and oscillator tables
    pub const GATE_VOLTAGE: u8 = 0xC0;
    pub const VSHP_SETTING: u8 = 0xC1;
    pub const VSLP_SETTING: u8 = 0xC2;
    pub const VSHN_SETTING: u8 = 0xC4;
    pub const VSLN_SETTING: u8 = 0xC5;
    pub const SOURCE_VOLTAGE: u8 = 0xC9;
    pub const AUTO_POWER_DOWN: u8 = 0xD0;
    pub const BOOSTER_ENABLE: u8 = 0xD1;
    pub const NVM_LOAD: u8 = 0xD6;
    pub const OSC_SETTING: u8 = 0xD8;
}

/// One row of an init table: a command byte, its payload, and the settle
/// delay mandated after it. The bring-up sequences are kept as data so a
/// recording transport can check them against the datasheet order.
pub struct InitCommand {
    /// Command byte.
    pub cmd: u8,
    /// Payload bytes sent with DC high.
    pub data: &'static [u8],
    /// Milliseconds to wait after the payload, 0 for none.
    pub delay_ms: u32,
}
