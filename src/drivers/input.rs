// Short/long press classification for the two push-buttons
//
// Each button is sampled on the poll interval. A press is tracked by
// an explicit state machine:
//
//   Idle --pressed--> Pressed(since) --held >= threshold--> Held
//     ^                    |                                  |
//     +--- Short <-released+                 Long <--released-+
//
// InputDriver::poll drives the tracker until the press resolves, so
// the caller blocks for as long as the button is held. No separate
// debounce: sampling at POLL_INTERVAL_MS filters contact bounce.
// Long is only ever decided on a pressed sample at or past the
// threshold; a release seen before that is Short, even when the
// released sample itself lands after the threshold.

use embedded_hal::digital::InputPin;
use log::debug;

use crate::board::button::Button;
use crate::config::Config;
use crate::kernel::clock::{Clock, Millis, elapsed_ms};

pub const LONG_PRESS_MS: u32 = 400;
pub const POLL_INTERVAL_MS: u32 = 10;

/// Press outcome for one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Short,
    Long,
}

/// Events are returned one at a time from InputDriver::poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Short(Button),
    Long(Button),
}

impl Event {
    pub const fn new(button: Button, press: Press) -> Self {
        match press {
            Press::Short => Event::Short(button),
            Press::Long => Event::Long(button),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Idle,
    Pressed { since: Millis },
    // already past the threshold, waiting for release
    Held { since: Millis },
}

pub struct PressTracker {
    state: PressState,
    long_press_ms: u32,
}

impl PressTracker {
    pub const fn new(long_press_ms: u32) -> Self {
        Self {
            state: PressState::Idle,
            long_press_ms,
        }
    }

    /// Feed one sample. Returns the classification when a press ends.
    pub fn update(&mut self, pressed: bool, now: Millis) -> Option<Press> {
        match (self.state, pressed) {
            (PressState::Idle, false) => None,
            (PressState::Idle, true) => {
                self.state = PressState::Pressed { since: now };
                None
            }
            (PressState::Pressed { since }, true) => {
                if elapsed_ms(since, now) >= self.long_press_ms {
                    debug!("press held {}ms, long", elapsed_ms(since, now));
                    self.state = PressState::Held { since };
                }
                None
            }
            (PressState::Pressed { .. }, false) => {
                self.state = PressState::Idle;
                Some(Press::Short)
            }
            (PressState::Held { .. }, true) => None,
            (PressState::Held { since }, false) => {
                debug!("released after {}ms", elapsed_ms(since, now));
                self.state = PressState::Idle;
                Some(Press::Long)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == PressState::Idle
    }

    #[cfg(test)]
    fn is_held(&self) -> bool {
        matches!(self.state, PressState::Held { .. })
    }
}

/// One pulled-up push-button; LOW means pressed.
pub struct PushButton<P> {
    pin: P,
    button: Button,
    tracker: PressTracker,
}

impl<P: InputPin> PushButton<P> {
    pub fn new(pin: P, button: Button, long_press_ms: u32) -> Self {
        Self {
            pin,
            button,
            tracker: PressTracker::new(long_press_ms),
        }
    }

    // a pin that can't be read counts as released
    pub fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }

    /// Sample the button; if it is down, block until it is released
    /// and classify the press.
    pub fn poll<C: Clock>(&mut self, clock: &mut C, interval_ms: u32) -> Option<Event> {
        loop {
            let pressed = self.is_pressed();
            if let Some(press) = self.tracker.update(pressed, clock.now_ms()) {
                return Some(Event::new(self.button, press));
            }
            if self.tracker.is_idle() {
                return None;
            }
            clock.sleep_ms(interval_ms);
        }
    }
}

pub struct InputDriver<P> {
    primary: PushButton<P>,
    secondary: PushButton<P>,
    interval_ms: u32,
}

impl<P: InputPin> InputDriver<P> {
    pub fn new(primary: P, secondary: P, config: &Config) -> Self {
        Self {
            primary: PushButton::new(primary, Button::Primary, config.long_press_ms),
            secondary: PushButton::new(secondary, Button::Secondary, config.long_press_ms),
            interval_ms: config.poll_interval_ms,
        }
    }

    /// Blocking poll of one button; None when it is not pressed.
    pub fn poll<C: Clock>(&mut self, button: Button, clock: &mut C) -> Option<Event> {
        let interval = self.interval_ms;
        let event = match button {
            Button::Primary => self.primary.poll(clock, interval),
            Button::Secondary => self.secondary.poll(clock, interval),
        };
        if let Some(ev) = event {
            debug!("input: {:?}", ev);
        }
        event
    }
}
