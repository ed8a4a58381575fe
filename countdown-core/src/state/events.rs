//! Events emitted by the countdown and the controller

/// Alarm edge produced by [`Countdown::set_in_alarm`](super::Countdown::set_in_alarm)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmEvent {
    /// Countdown reached zero while running
    Entered,
    /// Alarm acknowledged or overridden
    Exited,
}

/// Things that happened during one controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Alarm started ringing
    AlarmEntered,
    /// Alarm stopped ringing
    AlarmExited,
    /// Countdown started or resumed
    Started,
    /// Countdown paused
    Paused,
    /// Relative adjustment applied; carries the new remaining time
    Adjusted(u32),
    /// Remaining time replaced from an absolute position
    Set(u32),
    /// Frame could not be pushed to the panel
    DisplayFault,
}

impl From<AlarmEvent> for Event {
    fn from(event: AlarmEvent) -> Self {
        match event {
            AlarmEvent::Entered => Event::AlarmEntered,
            AlarmEvent::Exited => Event::AlarmExited,
        }
    }
}
