//! Tick orchestrator
//!
//! The [`Controller`] owns the countdown, the input strategy, the presenter
//! and the beeper. The firmware calls [`Controller::tick`] at a fixed
//! period; nothing else touches this state.
//!
//! Order of work within a tick:
//!
//! 1. Sample elapsed wall-clock time
//! 2. Poll keys and apply their intents
//! 3. Drive the beeper
//! 4. Poll the rotary position and apply it
//! 5. Rebuild the display text and pause flag
//! 6. Render
//! 7. Flush to the panel

use countdown_hal::ToneOutput;
use heapless::Vec;

use crate::alert::Beeper;
use crate::config::TimerConfig;
use crate::input::{InputStrategy, Intent, Intents};
use crate::presenter::Presenter;
use crate::rotary::RotaryMapping;
use crate::state::{AlarmEvent, Countdown, Event};

/// Maximum events reported from one tick
pub const MAX_TICK_EVENTS: usize = 16;

/// Events reported from one tick
pub type TickEvents = Vec<Event, MAX_TICK_EVENTS>;

/// Clock readings for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickTime {
    /// Monotonic milliseconds (blink and debounce timing)
    pub monotonic_ms: u64,
    /// Wall-clock seconds (countdown timing)
    pub wall_s: u64,
}

impl TickTime {
    /// Derive both readings from one monotonic millisecond counter
    pub const fn from_millis(ms: u64) -> Self {
        Self {
            monotonic_ms: ms,
            wall_s: ms / 1000,
        }
    }
}

/// Countdown timer application
pub struct Controller<I, P, T> {
    countdown: Countdown,
    input: I,
    presenter: P,
    beeper: Beeper<T>,
    mapping: RotaryMapping,
    events: TickEvents,
}

impl<I, P, T> Controller<I, P, T>
where
    I: InputStrategy,
    P: Presenter,
    T: ToneOutput,
{
    /// Assemble the application at boot time
    pub fn new(config: &TimerConfig, input: I, presenter: P, tone: T, now: TickTime) -> Self {
        Self {
            countdown: Countdown::new(now.wall_s),
            input,
            presenter,
            beeper: Beeper::new(tone, &config.buzzer),
            mapping: config.rotary_mapping(),
            events: TickEvents::new(),
        }
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn beeper(&self) -> &Beeper<T> {
        &self.beeper
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Run one control-loop iteration
    ///
    /// Returns what happened, for logging. Never fails: a panel error is
    /// reported as [`Event::DisplayFault`] and the next tick tries again.
    pub fn tick(&mut self, now: TickTime) -> &[Event] {
        self.events.clear();

        let edge = self.countdown.sample_elapsed(now.wall_s);
        self.dispatch_alarm(edge, now);

        let mut intents = Intents::new();
        self.input
            .poll_keys(now.monotonic_ms, self.countdown.in_alarm(), &mut intents);
        self.apply_intents(&intents, now);

        self.beeper.tick(now.monotonic_ms);

        intents.clear();
        self.input.poll_position(&mut intents);
        self.apply_intents(&intents, now);

        self.presenter.set_text(&self.countdown.display_text());
        self.presenter.set_paused(!self.countdown.is_running());
        self.presenter.render(now.monotonic_ms);

        if self.presenter.flush().is_err() {
            self.record(Event::DisplayFault);
        }

        &self.events
    }

    fn apply_intents(&mut self, intents: &Intents, now: TickTime) {
        for &intent in intents {
            self.apply(intent, now);
        }
    }

    fn apply(&mut self, intent: Intent, now: TickTime) {
        // A press that raced the alarm edge still only silences it
        if self.countdown.in_alarm() && !matches!(intent, Intent::Position(_)) {
            let edge = self.countdown.set_in_alarm(false);
            self.dispatch_alarm(edge, now);
            return;
        }

        match intent {
            Intent::Acknowledge => {}
            Intent::Toggle => {
                self.countdown.toggle(now.wall_s);
                let running = self.countdown.is_running();
                self.presenter.set_paused(!running);
                self.record(if running { Event::Started } else { Event::Paused });
            }
            Intent::Adjust(delta_s) => {
                let was_running = self.countdown.is_running();
                let edge = self.countdown.adjust_rounded(delta_s);
                self.countdown.pause();
                self.dispatch_alarm(edge, now);
                self.presenter.set_paused(true);
                if was_running {
                    self.record(Event::Paused);
                }
                self.record(Event::Adjusted(self.countdown.remaining()));
            }
            Intent::Position(position) => {
                let seconds = self.mapping.to_seconds(position);
                let edge = self.countdown.set_absolute(seconds);
                self.dispatch_alarm(edge, now);
                self.record(Event::Set(seconds));
            }
        }
    }

    /// Route an alarm edge to the beeper and the event log
    fn dispatch_alarm(&mut self, edge: Option<AlarmEvent>, now: TickTime) {
        let Some(edge) = edge else {
            return;
        };
        self.beeper
            .set_enabled(edge == AlarmEvent::Entered, now.monotonic_ms);
        self.record(edge.into());
    }

    fn record(&mut self, event: Event) {
        // Only the log misses out if a tick overflows
        self.events.push(event).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use countdown_display::{DisplayError, NullPanel};

    use crate::config::BlinkConfig;
    use crate::presenter::SurfacePresenter;

    /// Strategy replaying queued intents on the next poll
    #[derive(Default)]
    struct QueuedInput {
        keys: Intents,
        positions: Intents,
        saw_alarming: bool,
    }

    impl InputStrategy for QueuedInput {
        fn poll_keys(&mut self, _now_ms: u64, alarming: bool, intents: &mut Intents) {
            self.saw_alarming = alarming;
            for intent in self.keys.iter() {
                let intent = if alarming { Intent::Acknowledge } else { *intent };
                intents.push(intent).ok();
            }
            self.keys.clear();
        }

        fn poll_position(&mut self, intents: &mut Intents) {
            intents.extend(self.positions.iter().copied());
            self.positions.clear();
        }
    }

    #[derive(Default)]
    struct RecordingTone {
        armed: bool,
    }

    impl ToneOutput for RecordingTone {
        fn arm(&mut self, _frequency_hz: u32, _duty: u16) {
            self.armed = true;
        }

        fn disarm(&mut self) {
            self.armed = false;
        }

        fn is_armed(&self) -> bool {
            self.armed
        }
    }

    /// Presenter that remembers the last state and can fail flushes
    #[derive(Default)]
    struct RecordingPresenter {
        text: heapless::String<16>,
        paused: bool,
        renders: u32,
        fail_flush: bool,
    }

    impl Presenter for RecordingPresenter {
        fn set_text(&mut self, text: &str) {
            self.text.clear();
            self.text.push_str(text).ok();
        }

        fn set_paused(&mut self, paused: bool) {
            self.paused = paused;
        }

        fn render(&mut self, _now_ms: u64) {
            self.renders += 1;
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            if self.fail_flush {
                Err(DisplayError::Communication)
            } else {
                Ok(())
            }
        }
    }

    type TestController = Controller<QueuedInput, RecordingPresenter, RecordingTone>;

    fn controller() -> TestController {
        Controller::new(
            &TimerConfig::default(),
            QueuedInput::default(),
            RecordingPresenter::default(),
            RecordingTone::default(),
            TickTime::from_millis(0),
        )
    }

    fn press<P: Presenter>(controller: &mut Controller<QueuedInput, P, RecordingTone>, intent: Intent) {
        controller.input_mut().keys.push(intent).ok();
    }

    fn count(events: &[Event], wanted: Event) -> usize {
        events.iter().filter(|&&e| e == wanted).count()
    }

    #[test]
    fn test_idle_tick_renders_zero() {
        let mut timer = controller();
        let events = timer.tick(TickTime::from_millis(100));
        assert!(events.is_empty());
        assert_eq!(timer.presenter().text.as_str(), "0:00:00");
        assert!(timer.presenter().paused);
        assert_eq!(timer.presenter().renders, 1);
    }

    #[test]
    fn test_full_countdown_cycle() {
        let mut timer = controller();

        press(&mut timer, Intent::Adjust(60));
        let events = timer.tick(TickTime::from_millis(100));
        assert_eq!(events, &[Event::Adjusted(60)]);
        assert_eq!(timer.presenter().text.as_str(), "0:01:00");

        press(&mut timer, Intent::Toggle);
        assert_eq!(timer.tick(TickTime::from_millis(200)), &[Event::Started]);
        assert!(!timer.presenter().paused);

        timer.tick(TickTime::from_millis(30_200));
        assert_eq!(timer.presenter().text.as_str(), "0:00:30");

        let events = timer.tick(TickTime::from_millis(61_200));
        assert_eq!(events, &[Event::AlarmEntered]);
        assert!(timer.countdown().in_alarm());
        assert!(!timer.countdown().is_running());
        assert!(timer.beeper().is_enabled());
        assert!(timer.beeper().tone().is_armed());
        assert!(timer.presenter().paused);

        // Steady zero keeps ringing without re-entering
        for t in 1..20u64 {
            let events = timer.tick(TickTime::from_millis(61_200 + t * 100));
            assert_eq!(count(events, Event::AlarmEntered), 0);
        }

        press(&mut timer, Intent::Toggle);
        let events = timer.tick(TickTime::from_millis(64_000));
        assert_eq!(events, &[Event::AlarmExited]);
        assert!(timer.input_mut().saw_alarming);
        assert!(!timer.countdown().in_alarm());
        assert!(!timer.countdown().is_running());
        assert!(!timer.beeper().tone().is_armed());
    }

    #[test]
    fn test_acknowledge_does_not_toggle() {
        let mut timer = controller();
        press(&mut timer, Intent::Adjust(60));
        timer.tick(TickTime::from_millis(0));
        press(&mut timer, Intent::Toggle);
        timer.tick(TickTime::from_millis(1_000));
        timer.tick(TickTime::from_millis(70_000));
        assert!(timer.countdown().in_alarm());

        press(&mut timer, Intent::Adjust(60));
        timer.tick(TickTime::from_millis(70_100));
        assert_eq!(timer.countdown().remaining(), 0);
        assert!(!timer.countdown().is_running());

        // Next press behaves normally again
        press(&mut timer, Intent::Adjust(60));
        assert_eq!(timer.tick(TickTime::from_millis(70_200)), &[Event::Adjusted(60)]);
    }

    #[test]
    fn test_adjust_while_running_pauses() {
        let mut timer = controller();
        press(&mut timer, Intent::Adjust(120));
        timer.tick(TickTime::from_millis(0));
        press(&mut timer, Intent::Toggle);
        timer.tick(TickTime::from_millis(0));

        // 55 s into a two minute countdown
        timer.tick(TickTime::from_millis(55_000));
        assert_eq!(timer.countdown().remaining(), 65);

        press(&mut timer, Intent::Adjust(60));
        let events = timer.tick(TickTime::from_millis(55_100));
        assert_eq!(events, &[Event::Paused, Event::Adjusted(120)]);
        assert!(!timer.countdown().is_running());
        assert!(timer.presenter().paused);
    }

    #[test]
    fn test_position_sets_time_and_clears_alarm() {
        let mut timer = controller();
        press(&mut timer, Intent::Adjust(60));
        timer.tick(TickTime::from_millis(0));
        press(&mut timer, Intent::Toggle);
        timer.tick(TickTime::from_millis(0));
        timer.tick(TickTime::from_millis(61_000));
        assert!(timer.countdown().in_alarm());

        timer.input_mut().positions.push(Intent::Position(14)).ok();
        let events = timer.tick(TickTime::from_millis(61_100));
        assert_eq!(events, &[Event::AlarmExited, Event::Set(180)]);
        assert_eq!(timer.presenter().text.as_str(), "0:03:00");
        assert!(!timer.beeper().is_enabled());

        // Beeper is driven before the knob, so silence lands next tick
        timer.tick(TickTime::from_millis(61_200));
        assert!(!timer.beeper().tone().is_armed());
    }

    #[test]
    fn test_display_fault_reported_and_loop_continues() {
        let mut timer = controller();
        timer.presenter.fail_flush = true;
        assert_eq!(timer.tick(TickTime::from_millis(0)), &[Event::DisplayFault]);
        assert_eq!(timer.tick(TickTime::from_millis(100)), &[Event::DisplayFault]);

        timer.presenter.fail_flush = false;
        assert!(timer.tick(TickTime::from_millis(200)).is_empty());
        assert_eq!(timer.presenter().renders, 3);
    }

    #[test]
    fn test_beeper_pattern_during_alarm() {
        let mut timer = controller();
        press(&mut timer, Intent::Adjust(60));
        timer.tick(TickTime::from_millis(0));
        press(&mut timer, Intent::Toggle);
        timer.tick(TickTime::from_millis(0));

        timer.tick(TickTime::from_millis(60_000));
        assert!(timer.beeper().tone().is_armed());
        timer.tick(TickTime::from_millis(60_500));
        assert!(!timer.beeper().tone().is_armed());
        timer.tick(TickTime::from_millis(61_000));
        assert!(timer.beeper().tone().is_armed());
    }

    #[test]
    fn test_with_surface_presenter() {
        let presenter = SurfacePresenter::new(NullPanel::default(), &BlinkConfig::default());
        let mut timer = Controller::new(
            &TimerConfig::default(),
            QueuedInput::default(),
            presenter,
            RecordingTone::default(),
            TickTime::from_millis(0),
        );

        press(&mut timer, Intent::Adjust(60));
        timer.tick(TickTime::from_millis(0));
        assert_eq!(timer.presenter().state().text.as_str(), "0:01:00");
        assert!(timer.presenter().state().paused);
        assert!(timer.presenter().surface().lit_count() > 0);
        assert_eq!(timer.presenter().panel().frames(), 1);
    }
}
