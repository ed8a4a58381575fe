//! Key task
//!
//! Waits for edges on one key, debounces them and queues presses for the
//! tick loop. Keys are active low.

use countdown_core::input::{Edge, EdgeDebouncer, Key};
use countdown_hal::InputPin;
use countdown_hal_rp2040::gpio::ConfigInput;
use defmt::*;
use embassy_time::Instant;

use crate::input::KEY_PRESSES;

#[embassy_executor::task(pool_size = 2)]
pub async fn key_task(
    mut pin: ConfigInput<'static>,
    key: Key,
    debouncer: &'static EdgeDebouncer,
) {
    info!("Key task started: {:?}", key);

    loop {
        pin.wait_for_any_edge().await;

        let pressed = pin.is_low();
        debouncer.notify(pressed, Instant::now().as_millis(), |edge| {
            if edge == Edge::Pressed && KEY_PRESSES.try_send(key).is_err() {
                warn!("Press queue full, dropped {:?}", key);
            }
        });
    }
}
