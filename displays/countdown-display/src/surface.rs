//! Bit-packed monochrome framebuffer
//!
//! Layout: row-major, one bit per pixel, most significant bit first. Pixel
//! `(x, y)` lives in byte `y * ROW_BYTES + x / 8` at bit `7 - x % 8`.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Display width in pixels
pub const WIDTH: usize = 128;

/// Display height in pixels
pub const HEIGHT: usize = 64;

/// Bytes per packed row
pub const ROW_BYTES: usize = WIDTH / 8;

/// Total framebuffer size in bytes
pub const BUFFER_LEN: usize = HEIGHT * WIDTH / 8;

/// Render surface shared by all drawable elements
///
/// Allocated once at boot and mutated in place; it is never reallocated.
#[derive(Clone)]
pub struct Surface {
    buffer: [u8; BUFFER_LEN],
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// Create a blank (all off) surface
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_LEN],
        }
    }

    /// Fill the whole surface with one colour
    pub fn fill(&mut self, color: BinaryColor) {
        let byte = if color.is_on() { 0xFF } else { 0x00 };
        self.buffer.fill(byte);
    }

    /// Set a single pixel; out-of-bounds coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if let Some((index, mask)) = Self::locate(x, y) {
            if color.is_on() {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    /// Read a single pixel; out-of-bounds reads are off
    pub fn pixel(&self, x: i32, y: i32) -> BinaryColor {
        match Self::locate(x, y) {
            Some((index, mask)) => BinaryColor::from(self.buffer[index] & mask != 0),
            None => BinaryColor::Off,
        }
    }

    /// Raw packed bytes
    pub fn as_bytes(&self) -> &[u8; BUFFER_LEN] {
        &self.buffer
    }

    /// Iterate over packed rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.buffer.chunks_exact(ROW_BYTES)
    }

    /// Number of lit pixels (handy for tests and diagnostics)
    pub fn lit_count(&self) -> u32 {
        self.buffer.iter().map(|b| b.count_ones()).sum()
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * ROW_BYTES + x / 8, 0x80 >> (x % 8)))
    }
}

impl OriginDimensions for Surface {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Surface {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::Rectangle;

    #[test]
    fn test_msb_first_packing() {
        let mut surface = Surface::new();
        surface.set_pixel(0, 0, BinaryColor::On);
        surface.set_pixel(9, 1, BinaryColor::On);

        assert_eq!(surface.as_bytes()[0], 0b1000_0000);
        assert_eq!(surface.as_bytes()[ROW_BYTES + 1], 0b0100_0000);
        assert_eq!(surface.lit_count(), 2);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut surface = Surface::new();
        surface.set_pixel(-1, 0, BinaryColor::On);
        surface.set_pixel(WIDTH as i32, 0, BinaryColor::On);
        surface.set_pixel(0, HEIGHT as i32, BinaryColor::On);

        assert_eq!(surface.lit_count(), 0);
        assert_eq!(surface.pixel(-5, -5), BinaryColor::Off);
    }

    #[test]
    fn test_clear_and_fill_rect() {
        let mut surface = Surface::new();
        surface.clear(BinaryColor::On).unwrap();
        assert_eq!(surface.lit_count(), (WIDTH * HEIGHT) as u32);

        surface.clear(BinaryColor::Off).unwrap();
        surface
            .fill_solid(
                &Rectangle::new(Point::new(126, 62), Size::new(8, 8)),
                BinaryColor::On,
            )
            .unwrap();
        // Clipped to the 2x2 corner that is on screen
        assert_eq!(surface.lit_count(), 4);
        assert_eq!(surface.pixel(127, 63), BinaryColor::On);
    }

    #[test]
    fn test_rows_cover_buffer() {
        let surface = Surface::new();
        assert_eq!(surface.rows().count(), HEIGHT);
        assert!(surface.rows().all(|r| r.len() == ROW_BYTES));
    }
}
