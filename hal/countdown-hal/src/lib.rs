//! Countdown Hardware Abstraction Layer
//!
//! Traits implemented by chip-specific HALs so the timer core, the display
//! driver and the firmware glue stay independent of the MCU.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  countdown-core / countdown-display     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  countdown-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ countdown-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O (keys, panel control lines)
//! - [`spi::SpiBus`] - Write-only SPI master for the display panel
//! - [`tone::ToneOutput`] - Square-wave generator driving the piezo buzzer

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;
pub mod tone;

pub use gpio::{InputPin, OutputPin};
pub use spi::{SpiBus, SpiConfig};
pub use tone::ToneOutput;
