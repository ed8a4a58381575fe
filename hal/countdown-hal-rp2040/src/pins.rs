//! Config-driven pin assignment
//!
//! Display control lines, keys and encoder inputs come from the
//! configuration file, so they are taken from a [`PinBank`] by number at
//! runtime. Pins with a fixed board function (SPI clock and data, buzzer
//! PWM) are split off beforehand with their concrete types, because the
//! SPI and PWM drivers need them.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_10, PIN_11, PIN_5, PWM_SLICE2, SPI1};
use embassy_rp::{Peri, Peripherals};

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// Pins wired to fixed functions on the board
pub const BOARD_RESERVED: [u8; 3] = [BUZZER_PIN, SPI_SCK_PIN, SPI_MOSI_PIN];

/// Buzzer, PWM slice 2 channel B
pub const BUZZER_PIN: u8 = 5;
/// Display SPI clock
pub const SPI_SCK_PIN: u8 = 10;
/// Display SPI data
pub const SPI_MOSI_PIN: u8 = 11;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for a fixed board function
    Reserved,
}

/// Peripherals with a fixed board function
pub struct BoardPeripherals {
    pub spi: Peri<'static, SPI1>,
    pub spi_sck: Peri<'static, PIN_10>,
    pub spi_mosi: Peri<'static, PIN_11>,
    pub buzzer_slice: Peri<'static, PWM_SLICE2>,
    pub buzzer_pin: Peri<'static, PIN_5>,
}

/// Pin bank that holds the free GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Split the peripherals into the fixed board set and a bank of the rest
    pub fn split(p: Peripherals) -> (Self, BoardPeripherals) {
        let board = BoardPeripherals {
            spi: p.SPI1,
            spi_sck: p.PIN_10,
            spi_mosi: p.PIN_11,
            buzzer_slice: p.PWM_SLICE2,
            buzzer_pin: p.PIN_5,
        };

        let bank = Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                None, // buzzer PWM
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                None, // SPI1 SCK
                None, // SPI1 TX
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };

        (bank, board)
    }

    /// Take a pin by number
    ///
    /// Fails if the number is out of range, names a board-reserved pin, or
    /// the pin was already taken.
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        if pin_num as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if BOARD_RESERVED.contains(&pin_num) {
            return Err(PinError::Reserved);
        }
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Check if a pin is available
    pub fn is_available(&self, pin_num: u8) -> bool {
        self.pins
            .get(pin_num as usize)
            .is_some_and(|pin| pin.is_some())
    }
}
