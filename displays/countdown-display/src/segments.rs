//! Seven-segment digit renderer
//!
//! Each glyph is built from three horizontal bars (top, middle, bottom) and
//! four vertical half-bars. Bars are three pixels thick with tapered ends.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Segment bitmask for one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph(u8);

impl Glyph {
    pub const TOP: u8 = 1 << 0;
    pub const MIDDLE: u8 = 1 << 1;
    pub const BOTTOM: u8 = 1 << 2;
    pub const UPPER_LEFT: u8 = 1 << 3;
    pub const LOWER_LEFT: u8 = 1 << 4;
    pub const UPPER_RIGHT: u8 = 1 << 5;
    pub const LOWER_RIGHT: u8 = 1 << 6;

    const HORIZONTAL: [u8; 3] = [Self::TOP, Self::MIDDLE, Self::BOTTOM];
    /// Vertical bars in (column, half) order: left-upper, left-lower, right-upper, right-lower
    const VERTICAL: [u8; 4] = [
        Self::UPPER_LEFT,
        Self::LOWER_LEFT,
        Self::UPPER_RIGHT,
        Self::LOWER_RIGHT,
    ];

    /// Look up the glyph for a character
    pub const fn for_char(ch: char) -> Option<Self> {
        let bits = match ch {
            '0' => Self::TOP | Self::BOTTOM | Self::UPPER_LEFT | Self::LOWER_LEFT | Self::UPPER_RIGHT | Self::LOWER_RIGHT,
            '1' => Self::UPPER_LEFT | Self::LOWER_LEFT,
            '2' => Self::TOP | Self::MIDDLE | Self::BOTTOM | Self::LOWER_LEFT | Self::UPPER_RIGHT,
            '3' => Self::TOP | Self::MIDDLE | Self::BOTTOM | Self::UPPER_RIGHT | Self::LOWER_RIGHT,
            '4' => Self::MIDDLE | Self::UPPER_LEFT | Self::UPPER_RIGHT | Self::LOWER_RIGHT,
            '5' => Self::TOP | Self::MIDDLE | Self::BOTTOM | Self::UPPER_LEFT | Self::LOWER_RIGHT,
            '6' => Self::TOP | Self::MIDDLE | Self::BOTTOM | Self::UPPER_LEFT | Self::LOWER_LEFT | Self::LOWER_RIGHT,
            '7' => Self::TOP | Self::UPPER_RIGHT | Self::LOWER_RIGHT,
            '8' => 0x7F,
            '9' => Self::TOP | Self::MIDDLE | Self::BOTTOM | Self::UPPER_LEFT | Self::UPPER_RIGHT | Self::LOWER_RIGHT,
            '-' => Self::MIDDLE,
            ' ' => 0,
            _ => return None,
        };
        Some(Self(bits))
    }

    /// Whether a segment is lit
    pub const fn has(self, segment: u8) -> bool {
        self.0 & segment != 0
    }
}

/// Renders a time string with [`Glyph`]s onto any binary draw target
#[derive(Debug, Clone, Copy)]
pub struct SegmentedText {
    /// Bar length in pixels
    seg_size: i32,
    /// Gap between digit cells
    seg_space: i32,
}

impl Default for SegmentedText {
    fn default() -> Self {
        Self::new(15, 6)
    }
}

impl SegmentedText {
    /// Create a renderer with the given bar length and digit spacing
    pub const fn new(seg_size: u16, seg_space: u16) -> Self {
        Self {
            seg_size: seg_size as i32,
            seg_space: seg_space as i32,
        }
    }

    /// Horizontal advance for one character; unknown characters take no room
    fn advance(&self, ch: char) -> i32 {
        if ch == ':' {
            self.seg_size / 2
        } else if Glyph::for_char(ch).is_some() {
            self.seg_size + self.seg_space
        } else {
            0
        }
    }

    /// Width in pixels that `text` occupies
    pub fn width(&self, text: &str) -> u32 {
        text.chars().map(|c| self.advance(c)).sum::<i32>() as u32
    }

    /// Draw `text` with its top-left corner at `origin`
    ///
    /// Returns the x coordinate just past the last character.
    pub fn draw<D>(
        &self,
        target: &mut D,
        text: &str,
        origin: Point,
        color: BinaryColor,
    ) -> Result<i32, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut x = origin.x;
        let y = origin.y;

        for ch in text.chars() {
            if ch == ':' {
                let third = self.seg_size / 3;
                fill(target, x, y + 2 * third, 2, 2, color)?;
                fill(target, x, y + 4 * third, 2, 2, color)?;
            } else if let Some(glyph) = Glyph::for_char(ch) {
                self.draw_glyph(target, glyph, x, y, color)?;
            }
            x += self.advance(ch);
        }

        Ok(x)
    }

    fn draw_glyph<D>(
        &self,
        target: &mut D,
        glyph: Glyph,
        x: i32,
        y: i32,
        color: BinaryColor,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let size = self.seg_size;

        for (row, segment) in Glyph::HORIZONTAL.iter().enumerate() {
            if glyph.has(*segment) {
                let y_ = y + row as i32 * size;
                fill(target, x + 2, y_ - 1, size - 3, 1, color)?;
                fill(target, x + 1, y_, size - 1, 1, color)?;
                fill(target, x + 2, y_ + 1, size - 3, 1, color)?;
            }
        }

        for (index, segment) in Glyph::VERTICAL.iter().enumerate() {
            if glyph.has(*segment) {
                let x_ = x + (index as i32 / 2) * size;
                let y_ = y + (index as i32 % 2) * size;
                fill(target, x_ - 1, y_ + 2, 1, size - 3, color)?;
                fill(target, x_, y_ + 1, 1, size - 1, color)?;
                fill(target, x_ + 1, y_ + 2, 1, size - 3, color)?;
            }
        }

        Ok(())
    }
}

fn fill<D>(target: &mut D, x: i32, y: i32, w: i32, h: i32, color: BinaryColor) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if w <= 0 || h <= 0 {
        return Ok(());
    }
    target.fill_solid(
        &Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32)),
        color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    fn render(text: &str) -> Surface {
        let mut surface = Surface::new();
        SegmentedText::default()
            .draw(&mut surface, text, Point::new(8, 25), BinaryColor::On)
            .unwrap();
        surface
    }

    fn lit(surface: &Surface, x: i32, y: i32) -> bool {
        surface.pixel(x, y).is_on()
    }

    #[test]
    fn test_time_string_fits_display() {
        let text = SegmentedText::default();
        assert_eq!(text.width("0:00:00"), 5 * 21 + 2 * 7);
        assert!(8 + text.width("0:00:00") <= crate::surface::WIDTH as u32);
    }

    #[test]
    fn test_eight_lights_every_segment() {
        let surface = render("8");
        // Horizontal bars at rows 25, 40, 55
        assert!(lit(&surface, 15, 25));
        assert!(lit(&surface, 15, 40));
        assert!(lit(&surface, 15, 55));
        // Vertical bars at columns 8 and 23, both halves
        assert!(lit(&surface, 8, 32));
        assert!(lit(&surface, 8, 47));
        assert!(lit(&surface, 23, 32));
        assert!(lit(&surface, 23, 47));
        // Inside the loops stays dark
        assert!(!lit(&surface, 15, 32));
    }

    #[test]
    fn test_one_uses_left_column() {
        let surface = render("1");
        assert!(lit(&surface, 8, 32));
        assert!(lit(&surface, 8, 47));
        assert!(!lit(&surface, 23, 32));
        assert!(!lit(&surface, 15, 25));
    }

    #[test]
    fn test_colon_dots() {
        let surface = render(":");
        assert!(lit(&surface, 8, 35));
        assert!(lit(&surface, 9, 46));
        assert_eq!(surface.lit_count(), 8);
    }

    #[test]
    fn test_unknown_characters_skipped() {
        let text = SegmentedText::default();
        let mut surface = Surface::new();
        let end = text
            .draw(&mut surface, "x?", Point::new(8, 25), BinaryColor::On)
            .unwrap();
        assert_eq!(end, 8);
        assert_eq!(surface.lit_count(), 0);
        assert_eq!(text.width("1x1"), text.width("11"));
    }

    #[test]
    fn test_space_advances_without_drawing() {
        let text = SegmentedText::default();
        let mut surface = Surface::new();
        let end = text
            .draw(&mut surface, " ", Point::new(0, 0), BinaryColor::On)
            .unwrap();
        assert_eq!(end, 21);
        assert_eq!(surface.lit_count(), 0);
    }

    #[test]
    fn test_glyph_table() {
        assert!(Glyph::for_char('-').unwrap().has(Glyph::MIDDLE));
        assert!(!Glyph::for_char('0').unwrap().has(Glyph::MIDDLE));
        assert!(Glyph::for_char('a').is_none());
    }
}
