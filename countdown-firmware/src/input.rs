//! Input wiring
//!
//! Edge-driven keys run in their own tasks and hand debounced presses to
//! the tick loop through [`KEY_PRESSES`]. Polled keys and the encoder
//! position are read from the tick loop directly.

use countdown_core::config::{InputMode, TimerConfig};
use countdown_core::input::{
    ButtonPair, EdgeDebouncer, InputStrategy, Intents, Key, PolledKeys, PressSource, Presses,
    RotaryKnob,
};
use countdown_hal_rp2040::encoder::{Encoder, SharedPosition};
use countdown_hal_rp2040::gpio::ConfigInput;
use countdown_hal_rp2040::pins::{PinBank, PinError};
use defmt::*;
use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use static_cell::StaticCell;

use crate::board;
use crate::tasks;

/// Debounced presses waiting for the next tick
pub static KEY_PRESSES: Channel<CriticalSectionRawMutex, Key, 8> = Channel::new();

/// Encoder position written by the encoder task
static KNOB_POSITION: SharedPosition = SharedPosition::new();

static PRIMARY_DEBOUNCE: StaticCell<EdgeDebouncer> = StaticCell::new();
static SECONDARY_DEBOUNCE: StaticCell<EdgeDebouncer> = StaticCell::new();

/// Press source draining [`KEY_PRESSES`]
pub struct ChannelPresses;

impl PressSource for ChannelPresses {
    fn poll_presses(&mut self, _now_ms: u64, out: &mut Presses) {
        while !out.is_full() {
            let Ok(key) = KEY_PRESSES.try_receive() else {
                break;
            };
            out.push(key).ok();
        }
    }
}

type PolledPair = PolledKeys<ConfigInput<'static>, ConfigInput<'static>>;

/// Input strategy selected at startup
pub enum AnyInput {
    Buttons(ButtonPair<ChannelPresses>),
    Polled(ButtonPair<PolledPair>),
    Rotary(RotaryKnob<ChannelPresses, &'static SharedPosition>),
}

impl InputStrategy for AnyInput {
    fn poll_keys(&mut self, now_ms: u64, alarming: bool, intents: &mut Intents) {
        match self {
            Self::Buttons(s) => s.poll_keys(now_ms, alarming, intents),
            Self::Polled(s) => s.poll_keys(now_ms, alarming, intents),
            Self::Rotary(s) => s.poll_keys(now_ms, alarming, intents),
        }
    }

    fn poll_position(&mut self, intents: &mut Intents) {
        match self {
            Self::Buttons(s) => s.poll_position(intents),
            Self::Polled(s) => s.poll_position(intents),
            Self::Rotary(s) => s.poll_position(intents),
        }
    }
}

impl AnyInput {
    /// Keys that never report; used when the input pins are unavailable
    pub fn inert(config: &TimerConfig) -> Self {
        Self::Buttons(ButtonPair::new(ChannelPresses, config.keys.adjust_s))
    }

    /// Take the input pins and spawn the tasks the selected mode needs
    pub fn start(
        config: &TimerConfig,
        bank: &mut PinBank,
        spawner: &Spawner,
    ) -> Result<Self, PinError> {
        let keys = &config.keys;

        match config.input {
            InputMode::Buttons => {
                let primary = board::input(bank, &keys.primary_pin)?;
                let secondary = board::input(bank, &keys.secondary_pin)?;
                let primary_guard = PRIMARY_DEBOUNCE.init(EdgeDebouncer::new(keys.debounce_ms));
                let secondary_guard =
                    SECONDARY_DEBOUNCE.init(EdgeDebouncer::new(keys.debounce_ms));

                spawner
                    .spawn(tasks::key_task(primary, Key::Primary, primary_guard))
                    .unwrap();
                spawner
                    .spawn(tasks::key_task(secondary, Key::Secondary, secondary_guard))
                    .unwrap();

                Ok(Self::Buttons(ButtonPair::new(ChannelPresses, keys.adjust_s)))
            }
            InputMode::ButtonsPolled => {
                let primary = board::input(bank, &keys.primary_pin)?;
                let secondary = board::input(bank, &keys.secondary_pin)?;
                info!("Keys polled from the tick loop");

                Ok(Self::Polled(ButtonPair::new(
                    PolledKeys::new(primary, secondary),
                    keys.adjust_s,
                )))
            }
            InputMode::Rotary => {
                let key = board::input(bank, &keys.primary_pin)?;
                let a = board::input(bank, &config.rotary.a_pin)?;
                let b = board::input(bank, &config.rotary.b_pin)?;
                let guard = PRIMARY_DEBOUNCE.init(EdgeDebouncer::new(keys.debounce_ms));

                spawner
                    .spawn(tasks::key_task(key, Key::Primary, guard))
                    .unwrap();
                spawner
                    .spawn(tasks::encoder_task(Encoder::new(a, b), &KNOB_POSITION))
                    .unwrap();

                Ok(Self::Rotary(RotaryKnob::new(ChannelPresses, &KNOB_POSITION)))
            }
        }
    }
}
