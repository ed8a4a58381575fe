//! SH1107 OLED Display Driver
//!
//! Driver for the 128x64 SH1107 module (Pico-OLED-1.3 style) on a 4-wire
//! SPI bus. The panel is mounted rotated, so each 16-byte row of the packed
//! surface becomes one controller column, addressed from 63 downwards.
//! With segment remap off the controller takes the leftmost pixel of each
//! group in bit 0, so row bytes are bit-reversed on the wire.

use countdown_hal::{OutputPin, SpiBus};
use embedded_hal::delay::DelayNs;

use crate::backend::{DisplayError, FramePanel};
use crate::surface::{Surface, HEIGHT, ROW_BYTES};

/// SH1107 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0xDC;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const VERTICAL_ADDRESSING: u8 = 0x21;
    pub const SEG_REMAP_NORMAL: u8 = 0xA0;
    pub const COM_SCAN_INC: u8 = 0xC0;
    pub const ENTIRE_DISPLAY_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DESELECT: u8 = 0xDB;
    pub const SET_DC_DC: u8 = 0xAD;
}

/// Fixed bring-up script, sent one command byte at a time
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_LOW_COLUMN,
    cmd::SET_HIGH_COLUMN,
    cmd::SET_PAGE_ADDR,
    cmd::SET_START_LINE,
    0x00,
    cmd::SET_CONTRAST,
    0x6F,
    cmd::VERTICAL_ADDRESSING,
    cmd::SEG_REMAP_NORMAL,
    cmd::COM_SCAN_INC,
    cmd::ENTIRE_DISPLAY_RAM,
    cmd::SET_NORMAL,
    cmd::SET_MUX_RATIO,
    0x3F, // duty = 1/64
    cmd::SET_DISPLAY_OFFSET,
    0x60,
    cmd::SET_CLOCK_DIV,
    0x41,
    cmd::SET_PRECHARGE,
    0x22,
    cmd::SET_VCOM_DESELECT,
    0x35,
    cmd::SET_DC_DC,
    0x8A, // DC-DC converter on
    cmd::DISPLAY_ON,
];

/// Highest controller column, used for the first surface row
const LAST_COLUMN: u8 = (HEIGHT - 1) as u8;

/// SH1107 OLED driver
pub struct Sh1107<SPI, DC, CS, RST, D> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    delay: D,
    initialized: bool,
}

impl<SPI, DC, CS, RST, D> Sh1107<SPI, DC, CS, RST, D>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Create a new SH1107 driver; the panel stays untouched until `init`
    pub fn new(spi: SPI, dc: DC, mut cs: CS, rst: RST, delay: D) -> Self {
        cs.set_high();
        Self {
            spi,
            dc,
            cs,
            rst,
            delay,
            initialized: false,
        }
    }

    fn reset(&mut self) {
        self.rst.set_high();
        self.delay.delay_ms(1);
        self.rst.set_low();
        self.delay.delay_ms(10);
        self.rst.set_high();
    }

    /// Send a single command byte (DC low)
    fn command(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.dc.set_low();
        self.transfer(&[byte])
    }

    /// Send display data (DC high)
    fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high();
        self.transfer(bytes)
    }

    fn transfer(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.cs.set_low();
        let result = self.spi.write(bytes);
        self.cs.set_high();
        result.map_err(|_| DisplayError::Communication)
    }
}

impl<SPI, DC, CS, RST, D> FramePanel for Sh1107<SPI, DC, CS, RST, D>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    fn init(&mut self) -> Result<(), DisplayError> {
        self.reset();
        for &byte in INIT_SEQUENCE {
            self.command(byte)?;
        }
        self.initialized = true;
        Ok(())
    }

    fn flush(&mut self, surface: &Surface) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        let mut wire = [0u8; ROW_BYTES];

        self.command(cmd::SET_PAGE_ADDR)?;
        for (row, bytes) in surface.rows().enumerate() {
            let column = LAST_COLUMN - row as u8;
            self.command(cmd::SET_LOW_COLUMN | (column & 0x0F))?;
            self.command(cmd::SET_HIGH_COLUMN | (column >> 4))?;
            for (out, byte) in wire.iter_mut().zip(bytes) {
                *out = byte.reverse_bits();
            }
            self.data(&wire)?;
        }
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.initialized
    }
}
