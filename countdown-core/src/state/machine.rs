//! Countdown/alarm state machine
//!
//! The countdown owns the remaining time and the running/alarm flags. Every
//! mutation goes through a method here, and any method that can change the
//! alarm flag returns the resulting [`AlarmEvent`] so the caller can react to
//! the edge exactly once.
//!
//! Invariants upheld by construction:
//! - `remaining_s` never goes below zero (all arithmetic clamps)
//! - `in_alarm` implies `remaining_s == 0`
//! - `in_alarm` implies `!running`

use core::fmt::Write;

use heapless::String;

use super::events::AlarmEvent;

/// Capacity of the formatted display text ("H:MM:SS" with room for big hours)
pub const DISPLAY_TEXT_LEN: usize = 16;

/// Formatted remaining time
pub type DisplayText = String<DISPLAY_TEXT_LEN>;

/// Observable timer states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    /// Nothing left, not running, not ringing
    Idle,
    /// Counting down
    Running,
    /// Stopped with time left
    Paused,
    /// Reached zero and not yet acknowledged
    Alarming,
}

/// Countdown with edge-triggered alarm
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    remaining_s: u32,
    running: bool,
    in_alarm: bool,
    /// Wall-clock seconds at the last sample
    last_sample_s: u64,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Countdown {
    /// Create an idle countdown with zero time left
    pub const fn new(now_s: u64) -> Self {
        Self {
            remaining_s: 0,
            running: false,
            in_alarm: false,
            last_sample_s: now_s,
        }
    }

    /// Remaining time in seconds
    pub fn remaining(&self) -> u32 {
        self.remaining_s
    }

    /// Whether the countdown is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the alarm is ringing
    pub fn in_alarm(&self) -> bool {
        self.in_alarm
    }

    /// Current state
    pub fn state(&self) -> TimerState {
        if self.in_alarm {
            TimerState::Alarming
        } else if self.running {
            TimerState::Running
        } else if self.remaining_s > 0 {
            TimerState::Paused
        } else {
            TimerState::Idle
        }
    }

    /// Account for wall-clock time passed since the previous sample
    ///
    /// A clock that jumps backwards counts as no elapsed time.
    pub fn sample_elapsed(&mut self, now_s: u64) -> Option<AlarmEvent> {
        let mut event = None;

        if self.running && now_s != self.last_sample_s {
            let elapsed = now_s.saturating_sub(self.last_sample_s);
            let elapsed = i64::try_from(elapsed).unwrap_or(i64::MAX);
            event = self.apply_delta(-elapsed);
        }

        self.last_sample_s = now_s;
        event
    }

    /// Add (or with a negative delta, remove) time, clamping at zero
    pub fn adjust(&mut self, delta_s: i32) -> Option<AlarmEvent> {
        self.apply_delta(i64::from(delta_s))
    }

    /// Round down to the minute, then add `delta_s`
    ///
    /// Repeated "+1 minute" presses land on whole minutes regardless of
    /// sub-minute drift: 125 s + 60 gives 180 s.
    pub fn adjust_rounded(&mut self, delta_s: i32) -> Option<AlarmEvent> {
        let partial = i64::from(self.remaining_s % 60);
        self.apply_delta(i64::from(delta_s) - partial)
    }

    /// Replace the remaining time outright and silence any alarm
    pub fn set_absolute(&mut self, value_s: u32) -> Option<AlarmEvent> {
        self.remaining_s = value_s;
        self.set_in_alarm(false)
    }

    /// Start counting from `now_s`
    ///
    /// Resetting the sample point avoids charging the paused interval.
    /// Ignored while the alarm rings; it has to be acknowledged first.
    pub fn start(&mut self, now_s: u64) {
        if self.in_alarm {
            return;
        }
        self.last_sample_s = now_s;
        self.running = true;
    }

    /// Stop counting
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Start if paused, pause if running
    pub fn toggle(&mut self, now_s: u64) {
        if self.running {
            self.pause();
        } else {
            self.start(now_s);
        }
    }

    /// Edge-triggered alarm flag
    ///
    /// Writing the current value is a no-op. Writing a different value
    /// returns exactly one event. Entering the alarm stops the countdown
    /// and pins the remaining time at zero; leaving it keeps `running` false.
    #[must_use = "the alarm edge must be dispatched"]
    pub fn set_in_alarm(&mut self, value: bool) -> Option<AlarmEvent> {
        if value == self.in_alarm {
            return None;
        }

        let event = if value {
            self.running = false;
            self.remaining_s = 0;
            AlarmEvent::Entered
        } else {
            AlarmEvent::Exited
        };

        self.in_alarm = value;
        Some(event)
    }

    /// Format the remaining time as `H:MM:SS`
    pub fn display_text(&self) -> DisplayText {
        let minutes = self.remaining_s / 60;
        let seconds = self.remaining_s % 60;
        let hours = minutes / 60;
        let minutes = minutes % 60;

        let mut text = DisplayText::new();
        // Fits: u32::MAX seconds is 1193046 hours, "1193046:MM:SS" is 13 chars
        let _ = write!(text, "{}:{:02}:{:02}", hours, minutes, seconds);
        text
    }

    fn apply_delta(&mut self, delta_s: i64) -> Option<AlarmEvent> {
        let next = (i64::from(self.remaining_s) + delta_s).clamp(0, i64::from(u32::MAX));
        self.remaining_s = next as u32;

        if self.remaining_s > 0 {
            // Time was added back; a ringing alarm cannot hold with time left
            self.set_in_alarm(false)
        } else if self.running && !self.in_alarm {
            self.set_in_alarm(true)
        } else {
            None
        }
    }
}
