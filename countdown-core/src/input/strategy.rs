//! Input strategies
//!
//! One controller drives both hardware variants: a two-key board and a
//! single key plus rotary encoder. The strategy decides what a press or a
//! knob movement means; the controller only sees [`Intent`]s.

use heapless::Vec;

use super::{Key, PressSource, Presses};
use crate::rotary::{RotaryPosition, RotaryWatcher};

/// Maximum intents produced per poll
pub const MAX_INTENTS: usize = 8;

/// Intents collected during one poll
pub type Intents = Vec<Intent, MAX_INTENTS>;

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Intent {
    /// Start when stopped, pause when running
    Toggle,
    /// Round down to the minute, add seconds, and pause
    Adjust(i32),
    /// Knob moved to a new absolute position
    Position(i32),
    /// Silence a ringing alarm
    Acknowledge,
}

/// Maps raw input onto intents
pub trait InputStrategy {
    /// Collect key presses as intents
    ///
    /// While `alarming`, every press becomes [`Intent::Acknowledge`].
    fn poll_keys(&mut self, now_ms: u64, alarming: bool, intents: &mut Intents);

    /// Collect rotary movement as intents; keys-only strategies yield nothing
    fn poll_position(&mut self, _intents: &mut Intents) {}
}

fn push_presses(presses: &Presses, alarming: bool, intents: &mut Intents, map: impl Fn(Key) -> Intent) {
    for &key in presses {
        let intent = if alarming { Intent::Acknowledge } else { map(key) };
        if intents.push(intent).is_err() {
            break;
        }
    }
}

/// Two keys: primary toggles, secondary adds time
pub struct ButtonPair<S> {
    keys: S,
    adjust_s: i32,
}

impl<S: PressSource> ButtonPair<S> {
    /// Secondary presses add `adjust_s` seconds after rounding down
    pub fn new(keys: S, adjust_s: i32) -> Self {
        Self { keys, adjust_s }
    }
}

impl<S: PressSource> InputStrategy for ButtonPair<S> {
    fn poll_keys(&mut self, now_ms: u64, alarming: bool, intents: &mut Intents) {
        let mut presses = Presses::new();
        self.keys.poll_presses(now_ms, &mut presses);

        let adjust_s = self.adjust_s;
        push_presses(&presses, alarming, intents, |key| match key {
            Key::Primary => Intent::Toggle,
            Key::Secondary => Intent::Adjust(adjust_s),
        });
    }
}

/// One key plus an encoder setting the remaining time directly
pub struct RotaryKnob<S, R> {
    key: S,
    knob: RotaryWatcher<R>,
}

impl<S: PressSource, R: RotaryPosition> RotaryKnob<S, R> {
    /// Combine a key source with an encoder position
    pub fn new(key: S, position: R) -> Self {
        Self {
            key,
            knob: RotaryWatcher::new(position),
        }
    }
}

impl<S: PressSource, R: RotaryPosition> InputStrategy for RotaryKnob<S, R> {
    fn poll_keys(&mut self, now_ms: u64, alarming: bool, intents: &mut Intents) {
        let mut presses = Presses::new();
        self.key.poll_presses(now_ms, &mut presses);

        // Any key on this board is the start/pause key
        push_presses(&presses, alarming, intents, |_| Intent::Toggle);
    }

    fn poll_position(&mut self, intents: &mut Intents) {
        if let Some((_, new)) = self.knob.poll() {
            intents.push(Intent::Position(new)).ok();
        }
    }
}
