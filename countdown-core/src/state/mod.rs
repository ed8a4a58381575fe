//! Countdown state machine and its events
//!
//! The countdown is the only stateful entity that outlives a tick. Alarm
//! transitions are edge-triggered: a setter compares old and new values and
//! returns a tagged event only on change.

pub mod events;
pub mod machine;

pub use events::{AlarmEvent, Event};
pub use machine::{Countdown, DisplayText, TimerState, DISPLAY_TEXT_LEN};
