//! Display components for the countdown timer
//!
//! This crate provides:
//! - [`Surface`]: the bit-packed monochrome framebuffer every drawable element
//!   renders into. It implements `embedded_graphics::DrawTarget`, which is the
//!   line/rectangle primitive layer the renderers call.
//! - [`FramePanel`]: the backend trait that pushes a finished frame to hardware.
//! - [`Sh1107`]: the SPI driver for the 128x64 SH1107 OLED module.
//! - [`SegmentedText`]: seven-segment digit renderer for the time string.
//!
//! # Frame pipeline
//!
//! One writer per tick: the presenter clears the surface, draws the digits and
//! overlays, then the panel flushes the whole buffer once. Nothing reads the
//! surface mid-frame, so the panel never shows a half-drawn image.

#![no_std]

pub mod backend;
pub mod segments;
pub mod sh1107;
pub mod surface;

pub use backend::{DisplayError, FramePanel, NullPanel};
pub use segments::{Glyph, SegmentedText};
pub use sh1107::Sh1107;
pub use surface::{Surface, BUFFER_LEN, HEIGHT, ROW_BYTES, WIDTH};
