//! Tone generator abstraction for the piezo buzzer

/// Square-wave tone output
///
/// `disarm` must stop the generator entirely (slice disabled, pin idle),
/// not just write a zero duty cycle. It is called on every silent tick, so
/// implementations must tolerate repeated calls.
pub trait ToneOutput {
    /// Start (or retune) the tone
    ///
    /// - `frequency_hz`: tone frequency
    /// - `duty`: high-time fraction, 0..=65535
    fn arm(&mut self, frequency_hz: u32, duty: u16);

    /// Stop the tone and release the generator
    fn disarm(&mut self);

    /// Whether the generator is currently producing a tone
    fn is_armed(&self) -> bool;
}
