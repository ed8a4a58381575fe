//! Rotary encoder handler
//!
//! Decodes quadrature signals into an absolute position. The decoder task
//! writes a [`SharedPosition`]; the tick loop reads it through
//! [`RotaryPosition`].

use countdown_core::rotary::RotaryPosition;
use countdown_hal::InputPin;
use embassy_futures::select::select;
use portable_atomic::{AtomicI32, Ordering};

use crate::gpio::ConfigInput;

/// Encoder state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature decoder
///
/// Rejects bounce by requiring a full detent sequence. Levels are logic
/// levels with both lines idling high at a detent.
///
/// CW:  A leads B, Idle (1,1) -> (0,1) -> (0,0) -> (either high) -> +1
/// CCW: B leads A, Idle (1,1) -> (1,0) -> (0,0) -> (either high) -> -1
#[derive(Debug, Clone, Copy)]
pub struct Quadrature {
    state: State,
}

impl Default for Quadrature {
    fn default() -> Self {
        Self::new()
    }
}

impl Quadrature {
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Feed new line levels; returns the detent step if one completed
    pub fn update(&mut self, a: bool, b: bool) -> Option<i32> {
        match self.state {
            State::Idle => {
                if !a && b {
                    self.state = State::CwStep1;
                } else if a && !b {
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 | State::CcwStep1 => {
                if !a && !b {
                    self.state = if self.state == State::CwStep1 {
                        State::CwStep2
                    } else {
                        State::CcwStep2
                    };
                } else if a && b {
                    // Bounce back to the detent
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 | State::CcwStep2 => {
                if !(a || b) {
                    return None;
                }
                let step = if self.state == State::CwStep2 { 1 } else { -1 };
                self.state = State::Idle;
                Some(step)
            }
        }
    }
}

/// Encoder position shared between the decoder task and the tick loop
#[derive(Debug)]
pub struct SharedPosition(AtomicI32);

impl Default for SharedPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedPosition {
    pub const fn new() -> Self {
        Self(AtomicI32::new(0))
    }

    /// Move by `step` detents
    pub fn step(&self, step: i32) {
        self.0.fetch_add(step, Ordering::Relaxed);
    }
}

impl RotaryPosition for SharedPosition {
    fn current_value(&self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Quadrature encoder on two GPIO inputs
pub struct Encoder<'d> {
    a: ConfigInput<'d>,
    b: ConfigInput<'d>,
    decoder: Quadrature,
    last: (bool, bool),
}

impl<'d> Encoder<'d> {
    /// Create a new encoder handler
    pub fn new(a: ConfigInput<'d>, b: ConfigInput<'d>) -> Self {
        let last = (a.is_high(), b.is_high());
        Self {
            a,
            b,
            decoder: Quadrature::new(),
            last,
        }
    }

    /// Wait for a line change and decode it
    ///
    /// Returns the detent step if the change completed one.
    pub async fn next_step(&mut self) -> Option<i32> {
        select(self.a.wait_for_any_edge(), self.b.wait_for_any_edge()).await;

        let levels = (self.a.is_high(), self.b.is_high());
        if levels == self.last {
            return None;
        }
        self.last = levels;
        self.decoder.update(levels.0, levels.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(decoder: &mut Quadrature, levels: &[(bool, bool)]) -> i32 {
        levels
            .iter()
            .filter_map(|&(a, b)| decoder.update(a, b))
            .sum()
    }

    #[test]
    fn test_clockwise_detent() {
        let mut q = Quadrature::new();
        let cw = [(false, true), (false, false), (true, false), (true, true)];
        assert_eq!(feed(&mut q, &cw), 1);
        assert_eq!(feed(&mut q, &cw), 1);
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut q = Quadrature::new();
        let ccw = [(true, false), (false, false), (false, true), (true, true)];
        assert_eq!(feed(&mut q, &ccw), -1);
    }

    #[test]
    fn test_bounce_at_detent_ignored() {
        let mut q = Quadrature::new();
        let chatter = [(false, true), (true, true), (false, true), (true, true)];
        assert_eq!(feed(&mut q, &chatter), 0);
    }

    #[test]
    fn test_shared_position() {
        let position = SharedPosition::new();
        position.step(3);
        position.step(-1);
        assert_eq!(position.current_value(), 2);
    }
}
