//! PWM tone generator for the piezo buzzer
//!
//! Drives channel B of one PWM slice. The clock divider is picked so the
//! counter wrap stays within 16 bits for the requested frequency.

use countdown_hal::ToneOutput;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{ChannelBPin, Config, Pwm, Slice};
use embassy_rp::Peri;
use fixed::types::extra::U4;
use fixed::FixedU16;

/// Smallest divider in 1/16 steps (divide by 1)
const MIN_DIVIDER_X16: u32 = 16;
/// Largest divider in 1/16 steps (just under 256)
const MAX_DIVIDER_X16: u32 = 0xFFF;

/// Divider and wrap value for one tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timing {
    /// Clock divider in 1/16 steps
    divider_x16: u16,
    top: u16,
}

impl Timing {
    /// Pick the finest divider that keeps `top` in 16 bits
    fn for_frequency(clock_hz: u32, frequency_hz: u32) -> Self {
        let frequency_hz = u64::from(frequency_hz.max(1));
        let clock_x16 = u64::from(clock_hz) * 16;

        let divider_x16 = clock_x16
            .div_ceil(frequency_hz * 65_536)
            .clamp(u64::from(MIN_DIVIDER_X16), u64::from(MAX_DIVIDER_X16));
        let counts = (clock_x16 / (divider_x16 * frequency_hz)).clamp(1, 65_536);

        Self {
            divider_x16: divider_x16 as u16,
            top: (counts - 1) as u16,
        }
    }

    /// Compare value for a 0..=65535 duty fraction
    fn compare(&self, duty: u16) -> u16 {
        let counts = u32::from(self.top) + 1;
        (counts * u32::from(duty) / 65_536) as u16
    }
}

/// Piezo buzzer on a PWM channel B output
pub struct PwmTone<'d> {
    pwm: Pwm<'d>,
    config: Config,
    armed: Option<(u32, u16)>,
}

impl<'d> PwmTone<'d> {
    /// Take the slice and pin, leaving the output disabled
    pub fn new<T: Slice>(slice: Peri<'d, T>, pin: Peri<'d, impl ChannelBPin<T>>) -> Self {
        let mut config = Config::default();
        config.enable = false;
        Self {
            pwm: Pwm::new_output_b(slice, pin, config.clone()),
            config,
            armed: None,
        }
    }
}

impl ToneOutput for PwmTone<'_> {
    fn arm(&mut self, frequency_hz: u32, duty: u16) {
        // Rewriting an unchanged config restarts the period and clicks
        if self.armed == Some((frequency_hz, duty)) {
            return;
        }

        let timing = Timing::for_frequency(clk_sys_freq(), frequency_hz);
        self.config.divider = FixedU16::<U4>::from_bits(timing.divider_x16);
        self.config.top = timing.top;
        self.config.compare_b = timing.compare(duty);
        self.config.enable = true;
        self.pwm.set_config(&self.config);
        self.armed = Some((frequency_hz, duty));
    }

    fn disarm(&mut self) {
        self.config.compare_b = 0;
        self.config.enable = false;
        self.pwm.set_config(&self.config);
        self.armed = None;
    }

    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOCK: u32 = 125_000_000;

    fn actual_frequency(timing: Timing) -> u32 {
        (u64::from(CLOCK) * 16 / (u64::from(timing.divider_x16) * (u64::from(timing.top) + 1)))
            as u32
    }

    #[test]
    fn test_buzzer_tone() {
        let timing = Timing::for_frequency(CLOCK, 800);
        assert!(timing.divider_x16 >= 16);
        let f = actual_frequency(timing);
        assert!((795..=805).contains(&f), "{}", f);
        assert_eq!(u32::from(timing.compare(32768)), (u32::from(timing.top) + 1) / 2);
    }

    #[test]
    fn test_audible_range_fits() {
        for hz in [20, 440, 4_000, 20_000] {
            let timing = Timing::for_frequency(CLOCK, hz);
            let f = actual_frequency(timing);
            assert!(f.abs_diff(hz) * 100 <= hz, "{} Hz came out as {}", hz, f);
        }
    }

    #[test]
    fn test_duty_extremes() {
        let timing = Timing::for_frequency(CLOCK, 1_000);
        assert_eq!(timing.compare(0), 0);
        assert!(u32::from(timing.compare(65_535)) <= u32::from(timing.top) + 1);
    }
}
