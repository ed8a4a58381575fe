//! Screen presenters
//!
//! A presenter receives the display text and pause flag once per tick and
//! turns them into pixels (or log lines). The controller is generic over
//! [`Presenter`], so the OLED build and the headless build share one loop.

use countdown_display::{DisplayError, FramePanel, SegmentedText, Surface};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::blink::Blink;
use crate::config::BlinkConfig;
use crate::indicator::{PauseIndicator, INDICATOR_ORIGIN};
use crate::state::DisplayText;

/// Top-left corner of the digit string
pub const TEXT_ORIGIN: Point = Point::new(8, 25);

/// Something that shows the timer to the user
pub trait Presenter {
    /// Replace the display text
    fn set_text(&mut self, text: &str);

    /// Show or hide the pause/alarm indicator
    fn set_paused(&mut self, paused: bool);

    /// Compose the current state
    fn render(&mut self, now_ms: u64);

    /// Push the composed frame out
    fn flush(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }
}

/// What the screen should currently show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenState {
    pub text: DisplayText,
    pub paused: bool,
}

impl ScreenState {
    /// Replace the text; returns whether it changed
    ///
    /// Text longer than the buffer is cut at the last whole character.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text.as_str() == text {
            return false;
        }
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
        true
    }

    /// Replace the pause flag; returns whether it changed
    pub fn set_paused(&mut self, paused: bool) -> bool {
        core::mem::replace(&mut self.paused, paused) != paused
    }
}

/// Presenter drawing into a [`Surface`] mirrored to a [`FramePanel`]
pub struct SurfacePresenter<P> {
    panel: P,
    surface: Surface,
    digits: SegmentedText,
    indicator: PauseIndicator,
    state: ScreenState,
}

impl<P: FramePanel> SurfacePresenter<P> {
    /// Wrap an initialised panel
    pub fn new(panel: P, blink: &BlinkConfig) -> Self {
        Self {
            panel,
            surface: Surface::new(),
            digits: SegmentedText::default(),
            indicator: PauseIndicator::new(
                INDICATOR_ORIGIN,
                Blink::new(blink.show_ms, blink.hide_ms),
            ),
            state: ScreenState::default(),
        }
    }

    /// Last composed frame
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}

impl<P: FramePanel> Presenter for SurfacePresenter<P> {
    fn set_text(&mut self, text: &str) {
        self.state.set_text(text);
    }

    fn set_paused(&mut self, paused: bool) {
        self.state.set_paused(paused);
    }

    fn render(&mut self, now_ms: u64) {
        // Surface drawing is infallible
        self.surface.clear(BinaryColor::Off).ok();
        self.digits
            .draw(&mut self.surface, &self.state.text, TEXT_ORIGIN, BinaryColor::On)
            .ok();
        self.indicator
            .draw(&mut self.surface, self.state.paused, now_ms, BinaryColor::On)
            .ok();
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.panel.flush(&self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use countdown_display::NullPanel;

    fn presenter() -> SurfacePresenter<NullPanel> {
        SurfacePresenter::new(NullPanel::default(), &BlinkConfig::default())
    }

    #[test]
    fn test_screen_state_change_tracking() {
        let mut state = ScreenState::default();
        assert!(state.set_text("0:00:00"));
        assert!(!state.set_text("0:00:00"));
        assert!(state.set_text("0:00:59"));
        assert!(state.set_paused(true));
        assert!(!state.set_paused(true));
    }

    #[test]
    fn test_screen_state_truncates() {
        let mut state = ScreenState::default();
        state.set_text("0123456789abcdefXYZ");
        assert_eq!(state.text.as_str(), "0123456789abcdef");
    }

    #[test]
    fn test_render_draws_digits_and_indicator() {
        let mut screen = presenter();
        screen.set_text("0:00:00");
        screen.set_paused(false);
        screen.render(0);
        let digits_only = screen.surface().lit_count();
        assert!(digits_only > 0);
        assert!(!screen.surface().pixel(3, 3).is_on());

        screen.set_paused(true);
        screen.render(0);
        assert_eq!(screen.surface().lit_count(), digits_only + 48);
        assert!(screen.surface().pixel(3, 3).is_on());

        // Indicator blinks off, digits stay
        screen.render(500);
        assert_eq!(screen.surface().lit_count(), digits_only);
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let mut screen = presenter();
        screen.set_text("8:88:88");
        screen.render(0);
        let busy = screen.surface().lit_count();

        screen.set_text("1:11:11");
        screen.render(0);
        assert!(screen.surface().lit_count() < busy);
    }

    #[test]
    fn test_flush_reaches_panel() {
        let mut screen = presenter();
        screen.render(0);
        screen.flush().unwrap();
        screen.flush().unwrap();
        assert_eq!(screen.panel().frames(), 2);
    }
}
