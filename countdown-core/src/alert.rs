//! Audible alert
//!
//! Beeps the buzzer while the alarm is ringing. The beep cadence comes from
//! a dedicated [`Blink`], so it runs independently of the tick period and of
//! the on-screen indicator.

use countdown_hal::ToneOutput;

use crate::blink::Blink;
use crate::config::BuzzerConfig;

/// Buzzer driver gated by an enable flag and a blink oscillator
pub struct Beeper<T> {
    tone: T,
    blink: Blink,
    enabled: bool,
    frequency: u32,
    duty: u16,
}

impl<T: ToneOutput> Beeper<T> {
    /// Take ownership of the tone generator and silence it
    pub fn new(mut tone: T, config: &BuzzerConfig) -> Self {
        tone.disarm();
        Self {
            tone,
            blink: Blink::new(config.on_ms, config.off_ms),
            enabled: false,
            frequency: config.frequency,
            duty: config.duty,
        }
    }

    /// Whether the alarm currently wants sound
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn the beep pattern on or off
    ///
    /// Enabling restarts the pattern so the first beep is a full one.
    pub fn set_enabled(&mut self, enabled: bool, now_ms: u64) {
        if enabled && !self.enabled {
            self.blink.reset(now_ms);
        }
        self.enabled = enabled;
    }

    /// Drive the buzzer for this tick
    ///
    /// Disarms on every silent tick rather than trusting the last state.
    pub fn tick(&mut self, now_ms: u64) {
        if self.enabled && self.blink.can_show(now_ms) {
            self.tone.arm(self.frequency, self.duty);
        } else {
            self.tone.disarm();
        }
    }

    /// Underlying tone generator
    pub fn tone(&self) -> &T {
        &self.tone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tone generator that records what it was asked to do
    #[derive(Default)]
    struct RecordingTone {
        armed: Option<(u32, u16)>,
        arms: u32,
        disarms: u32,
    }

    impl ToneOutput for RecordingTone {
        fn arm(&mut self, frequency_hz: u32, duty: u16) {
            self.armed = Some((frequency_hz, duty));
            self.arms += 1;
        }

        fn disarm(&mut self) {
            self.armed = None;
            self.disarms += 1;
        }

        fn is_armed(&self) -> bool {
            self.armed.is_some()
        }
    }

    fn beeper() -> Beeper<RecordingTone> {
        Beeper::new(RecordingTone::default(), &BuzzerConfig::default())
    }

    #[test]
    fn test_silent_until_enabled() {
        let mut beeper = beeper();
        assert_eq!(beeper.tone().disarms, 1);

        for t in (0..2_000).step_by(100) {
            beeper.tick(t);
            assert!(!beeper.tone().is_armed());
        }
        assert_eq!(beeper.tone().arms, 0);
    }

    #[test]
    fn test_beep_pattern_follows_blink() {
        let mut beeper = beeper();
        beeper.set_enabled(true, 1_000);

        beeper.tick(1_000);
        assert_eq!(beeper.tone().armed, Some((800, 32768)));
        beeper.tick(1_400);
        assert!(beeper.tone().is_armed());
        beeper.tick(1_500);
        assert!(!beeper.tone().is_armed());
        beeper.tick(1_999);
        assert!(!beeper.tone().is_armed());
        beeper.tick(2_000);
        assert!(beeper.tone().is_armed());
    }

    #[test]
    fn test_disable_releases_tone_immediately() {
        let mut beeper = beeper();
        beeper.set_enabled(true, 0);
        beeper.tick(0);
        assert!(beeper.tone().is_armed());

        beeper.set_enabled(false, 100);
        beeper.tick(100);
        assert!(!beeper.tone().is_armed());

        // Keeps disarming while silent
        let before = beeper.tone().disarms;
        beeper.tick(200);
        beeper.tick(300);
        assert_eq!(beeper.tone().disarms, before + 2);
    }

    #[test]
    fn test_reenable_restarts_pattern() {
        let mut beeper = beeper();
        beeper.set_enabled(true, 0);
        beeper.tick(600);
        assert!(!beeper.tone().is_armed());

        beeper.set_enabled(false, 700);
        beeper.set_enabled(true, 700);
        beeper.tick(700);
        assert!(beeper.tone().is_armed());
    }
}
