//! Polled key pair
//!
//! For boards without edge interrupts on the key lines. Levels are sampled
//! once per tick and a press is synthesized on the first low sample after a
//! high one. Both pressed flags clear together once every key reads
//! released, so a key pressed again while the other is still held is not
//! seen until both are let go.

use countdown_hal::InputPin;

use super::{Key, PressSource, Presses};

/// Two active-low keys sampled from the tick loop
pub struct PolledKeys<A, B> {
    primary: A,
    secondary: B,
    primary_pressed: bool,
    secondary_pressed: bool,
}

impl<A: InputPin, B: InputPin> PolledKeys<A, B> {
    /// Wrap two key inputs
    ///
    /// Keys already held at construction do not produce a press until
    /// released and pressed again.
    pub fn new(primary: A, secondary: B) -> Self {
        let primary_pressed = primary.is_low();
        let secondary_pressed = secondary.is_low();
        Self {
            primary,
            secondary,
            primary_pressed,
            secondary_pressed,
        }
    }
}

impl<A: InputPin, B: InputPin> PressSource for PolledKeys<A, B> {
    fn poll_presses(&mut self, _now_ms: u64, out: &mut Presses) {
        let primary_low = self.primary.is_low();
        let secondary_low = self.secondary.is_low();

        if primary_low && !self.primary_pressed {
            self.primary_pressed = true;
            out.push(Key::Primary).ok();
        } else if secondary_low && !self.secondary_pressed {
            self.secondary_pressed = true;
            out.push(Key::Secondary).ok();
        } else if !primary_low && !secondary_low {
            self.primary_pressed = false;
            self.secondary_pressed = false;
        }
    }
}
