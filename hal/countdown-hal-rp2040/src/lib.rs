//! RP2040-specific HAL for the countdown timer firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `countdown-hal` traits, plus RP2040-specific functionality:
//!
//! - GPIO adapters honouring config pin inversion
//! - Pin bank for config-driven pin assignment
//! - Blocking SPI adapter for the display panel
//! - PWM tone generator for the piezo buzzer
//! - Quadrature encoder decoding into a shared position

#![no_std]

pub mod encoder;
pub mod gpio;
pub mod pins;
pub mod spi;
pub mod tone;

pub use countdown_hal::{InputPin, OutputPin, SpiBus, ToneOutput};
