//! User input
//!
//! Raw key levels and edges are turned into [`Key`] presses by a
//! [`PressSource`]; an [`InputStrategy`] then maps presses and rotary
//! movement onto the [`Intent`]s the controller acts on.

pub mod debounce;
pub mod polled;
pub mod strategy;

pub use debounce::{Edge, EdgeDebouncer};
pub use polled::PolledKeys;
pub use strategy::{ButtonPair, InputStrategy, Intent, Intents, RotaryKnob, MAX_INTENTS};

use heapless::Vec;

/// Maximum presses collected per tick
pub const MAX_PRESSES: usize = 4;

/// Presses collected during one tick
pub type Presses = Vec<Key, MAX_PRESSES>;

/// Physical key identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Start/pause (and the only key on the rotary build)
    Primary,
    /// Add-a-minute key
    Secondary,
}

/// Anything that yields debounced key presses once per tick
pub trait PressSource {
    /// Append presses observed since the last poll
    ///
    /// Presses beyond the capacity of `out` are dropped.
    fn poll_presses(&mut self, now_ms: u64, out: &mut Presses);
}
