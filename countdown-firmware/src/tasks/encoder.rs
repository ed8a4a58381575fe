//! Encoder task
//!
//! Decodes quadrature edges and accumulates detents into the shared
//! position read by the tick loop.

use countdown_hal_rp2040::encoder::{Encoder, SharedPosition};
use defmt::*;

#[embassy_executor::task]
pub async fn encoder_task(mut encoder: Encoder<'static>, position: &'static SharedPosition) {
    info!("Encoder task started");

    loop {
        if let Some(step) = encoder.next_step().await {
            position.step(step);
            trace!("Encoder step {}", step);
        }
    }
}
