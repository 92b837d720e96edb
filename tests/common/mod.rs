// Simulated hardware for driving a Jukebox on the host.
//
// All parts share one millisecond counter: sleeping advances it and
// the scripted buttons read their level from it.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use pokedex_player::apps::Jukebox;
use pokedex_player::config::Config;
use pokedex_player::drivers::audio::{AudioPlayer, Command, PlayerError, Source};
use pokedex_player::kernel::clock::{Clock, Millis};
use smart_leds::{RGB8, SmartLedsWrite};

pub type Now = Rc<Cell<u32>>;

#[derive(Clone)]
pub struct SimClock {
    pub now: Now,
}

impl Clock for SimClock {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.now.set(self.now.get() + ms);
    }
}

/// Button driven by a per-poll script.
///
/// Each time the pin is sampled while released and idle, the next
/// script entry decides the pass: `Some(ms)` holds it down for that
/// long, `None` (or an empty script) leaves it up.
pub struct ScriptedPin {
    now: Now,
    script: Rc<RefCell<VecDeque<Option<u32>>>>,
    release_at: Option<u32>,
}

impl ScriptedPin {
    pub fn new(now: &Now, script: &[Option<u32>]) -> Self {
        Self {
            now: now.clone(),
            script: Rc::new(RefCell::new(script.iter().copied().collect())),
            release_at: None,
        }
    }
}

impl embedded_hal::digital::ErrorType for ScriptedPin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for ScriptedPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        let t = self.now.get();
        if let Some(release_at) = self.release_at {
            if t < release_at {
                return Ok(true);
            }
            self.release_at = None;
            return Ok(false);
        }
        match self.script.borrow_mut().pop_front().flatten() {
            Some(hold) if hold > 0 => {
                self.release_at = Some(t + hold);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[derive(Clone, Default)]
pub struct Recorder {
    pub commands: Rc<RefCell<Vec<Command>>>,
    pub fail: bool,
}

impl Recorder {
    fn record(&mut self, c: Command) -> Result<(), PlayerError> {
        self.commands.borrow_mut().push(c);
        if self.fail {
            Err(PlayerError::CommandTimeout)
        } else {
            Ok(())
        }
    }

    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.borrow_mut())
    }
}

impl AudioPlayer for Recorder {
    fn reset(&mut self) -> Result<(), PlayerError> {
        self.record(Command::Reset)
    }
    fn select_source(&mut self, source: Source) -> Result<(), PlayerError> {
        self.record(Command::SelectSource(source))
    }
    fn set_volume(&mut self, level: u8) -> Result<(), PlayerError> {
        self.record(Command::SetVolume(level))
    }
    fn play(&mut self, track: u16) -> Result<(), PlayerError> {
        self.record(Command::Play(track))
    }
    fn pause(&mut self) -> Result<(), PlayerError> {
        self.record(Command::Pause)
    }
    fn resume(&mut self) -> Result<(), PlayerError> {
        self.record(Command::Resume)
    }
}

#[derive(Default)]
pub struct LedCapture {
    pub flushes: usize,
    pub last: Vec<RGB8>,
}

impl SmartLedsWrite for LedCapture {
    type Error = Infallible;
    type Color = RGB8;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Infallible>
    where
        T: IntoIterator<Item = I>,
        I: Into<RGB8>,
    {
        self.flushes += 1;
        self.last = iterator.into_iter().map(Into::into).collect();
        Ok(())
    }
}

pub type SimJukebox = Jukebox<Recorder, LedCapture, ScriptedPin, SimClock>;

pub struct Rig {
    pub jukebox: SimJukebox,
    pub commands: Recorder,
    pub now: Now,
}

/// Jukebox with the given per-cycle press scripts, not yet booted.
pub fn rig(primary: &[Option<u32>], secondary: &[Option<u32>], player: Recorder) -> Rig {
    let now: Now = Rc::new(Cell::new(0));
    let commands = player.clone();
    let jukebox = Jukebox::new(
        player,
        LedCapture::default(),
        ScriptedPin::new(&now, primary),
        ScriptedPin::new(&now, secondary),
        SimClock { now: now.clone() },
        Config::defaults(),
    );
    Rig {
        jukebox,
        commands,
        now,
    }
}
