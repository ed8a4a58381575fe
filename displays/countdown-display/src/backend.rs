//! Display backend trait
//!
//! Separates "what is on the surface" from "how it reaches the glass".

use crate::surface::Surface;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel controller
    Communication,
    /// Flush attempted before the bring-up sequence ran
    NotInitialized,
}

/// Panel that can mirror a [`Surface`]
pub trait FramePanel {
    /// Run the controller bring-up script
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Push the whole surface to the panel
    fn flush(&mut self, surface: &Surface) -> Result<(), DisplayError>;

    /// Whether bring-up has completed
    fn is_ready(&self) -> bool;
}

/// Panel that discards frames
///
/// Used when the firmware runs without a display attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPanel {
    frames: u32,
}

impl NullPanel {
    /// Number of frames flushed so far
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl FramePanel for NullPanel {
    fn init(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn flush(&mut self, _surface: &Surface) -> Result<(), DisplayError> {
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }
}
