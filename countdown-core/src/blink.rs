//! Blink oscillator
//!
//! Alternates a "showing" flag between two independently configured
//! durations, measured on the monotonic millisecond clock. Transition times
//! advance by exactly one phase duration, so the pattern stays locked to the
//! first poll no matter how irregularly it is polled.

/// Time-based boolean toggler
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Blink {
    show_ms: u32,
    hide_ms: u32,
    is_showing: bool,
    /// Start of the current phase; set on first poll
    changed_at_ms: Option<u64>,
}

impl Blink {
    /// Create an oscillator that starts in the showing phase
    pub const fn new(show_ms: u32, hide_ms: u32) -> Self {
        Self {
            show_ms,
            hide_ms,
            is_showing: true,
            changed_at_ms: None,
        }
    }

    /// Restart in the showing phase at `now_ms`
    pub fn reset(&mut self, now_ms: u64) {
        self.is_showing = true;
        self.changed_at_ms = Some(now_ms);
    }

    /// Current phase without advancing
    pub fn is_showing(&self) -> bool {
        self.is_showing
    }

    /// Advance to `now_ms` and report the phase
    ///
    /// Not idempotent: a call may flip the phase when the current one has
    /// run its course.
    pub fn can_show(&mut self, now_ms: u64) -> bool {
        let period = u64::from(self.show_ms) + u64::from(self.hide_ms);
        let anchor = *self.changed_at_ms.get_or_insert(now_ms);
        if period == 0 {
            return self.is_showing;
        }

        let mut anchor = anchor;
        let mut elapsed = now_ms.saturating_sub(anchor);

        // Whole periods leave the phase unchanged
        let skipped = elapsed - elapsed % period;
        anchor += skipped;
        elapsed -= skipped;

        loop {
            let phase = u64::from(if self.is_showing {
                self.show_ms
            } else {
                self.hide_ms
            });
            if elapsed < phase {
                break;
            }
            elapsed -= phase;
            anchor += phase;
            self.is_showing = !self.is_showing;
        }

        self.changed_at_ms = Some(anchor);
        self.is_showing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alternates_every_half_second() {
        let mut blink = Blink::new(500, 500);

        assert!(blink.can_show(0));
        assert!(blink.can_show(499));
        assert!(!blink.can_show(500));
        assert!(!blink.can_show(999));
        assert!(blink.can_show(1000));
        assert!(!blink.can_show(1500));
    }

    #[test]
    fn test_asymmetric_durations() {
        let mut blink = Blink::new(100, 300);

        assert!(blink.can_show(1_000));
        assert!(!blink.can_show(1_100));
        assert!(!blink.can_show(1_399));
        assert!(blink.can_show(1_400));
    }

    #[test]
    fn test_sparse_polling_keeps_phase() {
        let mut blink = Blink::new(500, 500);
        assert!(blink.can_show(0));
        // Ten and a half periods later we are in a hide phase
        assert!(!blink.can_show(10_700));
        assert!(blink.can_show(11_000));
    }

    #[test]
    fn test_reset_restarts_showing() {
        let mut blink = Blink::new(500, 500);
        blink.can_show(0);
        assert!(!blink.can_show(600));

        blink.reset(600);
        assert!(blink.can_show(600));
        assert!(blink.can_show(1_099));
        assert!(!blink.can_show(1_100));
    }

    #[test]
    fn test_clock_going_backwards_holds_phase() {
        let mut blink = Blink::new(500, 500);
        blink.can_show(1_000);
        assert!(!blink.can_show(1_600));
        assert!(!blink.can_show(100));
    }

    #[test]
    fn test_zero_durations_are_steady() {
        let mut blink = Blink::new(0, 0);
        assert!(blink.can_show(0));
        assert!(blink.can_show(123_456));
    }

    proptest! {
        #[test]
        fn prop_phase_independent_of_poll_pattern(
            start in 0u64..1_000_000,
            steps in prop::collection::vec(0u64..2_500, 1..200),
        ) {
            let mut blink = Blink::new(500, 500);
            prop_assert!(blink.can_show(start));

            let mut now = start;
            for step in steps {
                now += step;
                let expected = (now - start) % 1_000 < 500;
                prop_assert_eq!(blink.can_show(now), expected);
            }
        }
    }
}
