//! GPIO pin abstractions
//!
//! Pins are infallible at this level: a failed GPIO write on the target MCUs
//! is not observable, and the control loop has nothing useful to do with it.

/// Digital output pin (panel DC/CS/RST lines)
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);
}

/// Digital input pin
///
/// Keys are wired active-low with pull-ups, so a pressed key reads low.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
