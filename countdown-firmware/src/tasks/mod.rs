//! Embassy async tasks
//!
//! The tick task owns the controller. Key and encoder tasks only feed it.

pub mod encoder;
pub mod keys;
pub mod tick;

pub use encoder::encoder_task;
pub use keys::key_task;
pub use tick::{tick_task, TimerController};
