//! Tick task
//!
//! Drives the controller at the configured period: sample the countdown,
//! apply input, run the buzzer and repaint.

use countdown_core::controller::TickTime;
use countdown_core::state::Event;
use countdown_core::Controller;
use countdown_hal_rp2040::tone::PwmTone;
use defmt::*;
use embassy_time::{Duration, Instant, Timer};

use crate::display::AnyPresenter;
use crate::input::AnyInput;

/// The controller as assembled for this board
pub type TimerController = Controller<AnyInput, AnyPresenter, PwmTone<'static>>;

/// Current time on the embassy clock
pub fn now() -> TickTime {
    TickTime::from_millis(Instant::now().as_millis())
}

#[embassy_executor::task]
pub async fn tick_task(controller: &'static mut TimerController, period: Duration) {
    info!("Tick task started ({}ms)", period.as_millis());

    loop {
        for event in controller.tick(now()) {
            match event {
                Event::AlarmEntered => info!("Time is up"),
                Event::AlarmExited => info!("Alarm acknowledged"),
                Event::Started => info!("Countdown started"),
                Event::Paused => info!("Countdown paused"),
                Event::Adjusted(s) => info!("Adjusted to {}s", s),
                Event::Set(s) => info!("Set to {}s", s),
                Event::DisplayFault => warn!("Display flush failed"),
            }
        }

        Timer::after(period).await;
    }
}
