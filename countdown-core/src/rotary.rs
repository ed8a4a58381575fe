//! Rotary encoder glue
//!
//! Quadrature decoding happens elsewhere (an interrupt-driven driver on the
//! target). The core only reads an absolute position, notices when it moved
//! since the previous tick, and maps it onto a remaining time.

/// Absolute position published by an encoder driver
pub trait RotaryPosition {
    /// Current decoded position
    fn current_value(&self) -> i32;
}

impl<T: RotaryPosition + ?Sized> RotaryPosition for &T {
    fn current_value(&self) -> i32 {
        (**self).current_value()
    }
}

/// Per-tick change detector over a [`RotaryPosition`]
pub struct RotaryWatcher<R> {
    source: R,
    last: i32,
}

impl<R: RotaryPosition> RotaryWatcher<R> {
    /// Start watching from the source's current position
    pub fn new(source: R) -> Self {
        let last = source.current_value();
        Self { source, last }
    }

    /// Last position seen by [`poll`](Self::poll)
    pub fn last(&self) -> i32 {
        self.last
    }

    /// Returns `(old, new)` if the position moved since the previous poll
    pub fn poll(&mut self) -> Option<(i32, i32)> {
        let current = self.source.current_value();
        if current == self.last {
            return None;
        }
        let old = core::mem::replace(&mut self.last, current);
        Some((old, current))
    }
}

/// Two-slope position to seconds mapping
///
/// Positions up to `fine_limit` count `fine_step_s` each; every detent past
/// that adds `coarse_step_s`. Negative positions map to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotaryMapping {
    pub fine_limit: u32,
    pub fine_step_s: u32,
    pub coarse_step_s: u32,
}

impl Default for RotaryMapping {
    fn default() -> Self {
        Self {
            fine_limit: 12,
            fine_step_s: 5,
            coarse_step_s: 60,
        }
    }
}

impl RotaryMapping {
    /// Remaining time for an absolute position, saturating at `u32::MAX`
    pub fn to_seconds(&self, position: i32) -> u32 {
        let Ok(position) = u64::try_from(position) else {
            return 0;
        };

        let limit = u64::from(self.fine_limit);
        let seconds = if position <= limit {
            position * u64::from(self.fine_step_s)
        } else {
            limit * u64::from(self.fine_step_s) + (position - limit) * u64::from(self.coarse_step_s)
        };

        u32::try_from(seconds).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;

    struct Knob<'a>(&'a Cell<i32>);

    impl RotaryPosition for Knob<'_> {
        fn current_value(&self) -> i32 {
            self.0.get()
        }
    }

    #[test]
    fn test_watcher_yields_old_and_new() {
        let position = Cell::new(4);
        let mut watcher = RotaryWatcher::new(Knob(&position));

        assert_eq!(watcher.poll(), None);
        position.set(6);
        assert_eq!(watcher.poll(), Some((4, 6)));
        assert_eq!(watcher.poll(), None);
        position.set(-1);
        assert_eq!(watcher.poll(), Some((6, -1)));
        assert_eq!(watcher.last(), -1);
    }

    #[test]
    fn test_mapping_regions() {
        let mapping = RotaryMapping::default();

        assert_eq!(mapping.to_seconds(0), 0);
        assert_eq!(mapping.to_seconds(1), 5);
        assert_eq!(mapping.to_seconds(12), 60);
        assert_eq!(mapping.to_seconds(13), 120);
        assert_eq!(mapping.to_seconds(20), 540);
        assert_eq!(mapping.to_seconds(-3), 0);
    }

    #[test]
    fn test_mapping_saturates() {
        let mapping = RotaryMapping {
            fine_limit: 0,
            fine_step_s: 1,
            coarse_step_s: u32::MAX,
        };
        assert_eq!(mapping.to_seconds(i32::MAX), u32::MAX);
    }

    proptest! {
        #[test]
        fn prop_mapping_monotonic(position in -1_000i32..100_000) {
            let mapping = RotaryMapping::default();
            prop_assert!(mapping.to_seconds(position) <= mapping.to_seconds(position + 1));
        }
    }
}
