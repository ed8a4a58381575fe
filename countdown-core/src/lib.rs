//! Board-agnostic core logic for the countdown timer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Countdown/alarm state machine with edge-triggered alarm events
//! - Blink oscillator shared by the on-screen indicator and the buzzer
//! - Debounced key input (edge-driven and polled) and input strategies
//! - Rotary position glue and position-to-time mapping
//! - Screen presenters and the pause indicator
//! - The tick controller tying it all together
//! - Configuration types and the embedded configuration reader

#![no_std]
#![deny(unsafe_code)]

pub mod alert;
pub mod blink;
pub mod config;
pub mod controller;
pub mod indicator;
pub mod input;
pub mod presenter;
pub mod rotary;
pub mod state;

pub use controller::{Controller, TickTime};
