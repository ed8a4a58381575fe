//! Pause/alarm indicator
//!
//! A blinking two-bar "pause" glyph in the top-left corner, shown whenever
//! the countdown is not running.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::blink::Blink;

/// Glyph placement on the reference layout
pub const INDICATOR_ORIGIN: Point = Point::new(3, 3);

/// Glyph cell size
pub const INDICATOR_SIZE: u32 = 8;

const BAR_WIDTH: u32 = 3;
const BAR_OFFSETS: [i32; 2] = [0, 5];

/// Blinking pause glyph
#[derive(Debug, Clone)]
pub struct PauseIndicator {
    origin: Point,
    blink: Blink,
}

impl PauseIndicator {
    /// Create an indicator at `origin` with the given blink timing
    pub const fn new(origin: Point, blink: Blink) -> Self {
        Self { origin, blink }
    }

    /// Draw the glyph if `active` and the blink is in its showing phase
    ///
    /// The blink only advances while active. Returns whether the glyph was
    /// drawn.
    pub fn draw<D>(
        &mut self,
        target: &mut D,
        active: bool,
        now_ms: u64,
        color: BinaryColor,
    ) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if !active || !self.blink.can_show(now_ms) {
            return Ok(false);
        }

        for dx in BAR_OFFSETS {
            let bar = Rectangle::new(
                self.origin + Point::new(dx, 0),
                Size::new(BAR_WIDTH, INDICATOR_SIZE),
            );
            target.fill_solid(&bar, color)?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use countdown_display::Surface;

    fn indicator() -> PauseIndicator {
        PauseIndicator::new(INDICATOR_ORIGIN, Blink::new(500, 500))
    }

    #[test]
    fn test_draws_two_bars() {
        let mut surface = Surface::new();
        let drawn = indicator()
            .draw(&mut surface, true, 0, BinaryColor::On)
            .unwrap();

        assert!(drawn);
        assert_eq!(surface.lit_count(), 2 * 3 * 8);
        assert!(surface.pixel(3, 3).is_on());
        assert!(surface.pixel(5, 10).is_on());
        assert!(!surface.pixel(6, 5).is_on());
        assert!(!surface.pixel(7, 5).is_on());
        assert!(surface.pixel(8, 5).is_on());
        assert!(surface.pixel(10, 10).is_on());
        assert!(!surface.pixel(11, 10).is_on());
    }

    #[test]
    fn test_blinks_while_active() {
        let mut glyph = indicator();
        let mut surface = Surface::new();

        assert!(glyph.draw(&mut surface, true, 0, BinaryColor::On).unwrap());
        assert!(!glyph.draw(&mut surface, true, 500, BinaryColor::On).unwrap());
        assert!(glyph.draw(&mut surface, true, 1_000, BinaryColor::On).unwrap());
    }

    #[test]
    fn test_hidden_when_inactive() {
        let mut surface = Surface::new();
        let drawn = indicator()
            .draw(&mut surface, false, 0, BinaryColor::On)
            .unwrap();
        assert!(!drawn);
        assert_eq!(surface.lit_count(), 0);
    }
}
