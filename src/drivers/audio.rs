// Audio player command set and the driver seam
//
// The playback logic only ever talks to an AudioPlayer; the DFPlayer
// Mini is the one implementation on hardware, tests plug in a recorder.

use core::fmt;

pub const MAX_VOLUME: u8 = 30;

/// Storage device the player reads tracks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Usb,
    SdCard,
    Aux,
    Flash,
}

impl Source {
    pub const fn name(self) -> &'static str {
        match self {
            Source::Usb => "usb",
            Source::SdCard => "sdcard",
            Source::Aux => "aux",
            Source::Flash => "flash",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reset,
    SelectSource(Source),
    SetVolume(u8),
    Play(u16),
    Pause,
    Resume,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Reset => write!(f, "reset"),
            Command::SelectSource(s) => write!(f, "select source {}", s),
            Command::SetVolume(v) => write!(f, "set volume {}", v),
            Command::Play(t) => write!(f, "play track {}", t),
            Command::Pause => write!(f, "pause"),
            Command::Resume => write!(f, "resume"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerError {
    /// Module not answering, busy, or reporting a fault (e.g. no card)
    DeviceUnavailable,
    /// No acknowledgement within the timeout
    CommandTimeout,
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::DeviceUnavailable => write!(f, "device unavailable"),
            PlayerError::CommandTimeout => write!(f, "command timed out"),
        }
    }
}

impl core::error::Error for PlayerError {}

pub trait AudioPlayer {
    fn reset(&mut self) -> Result<(), PlayerError>;
    fn select_source(&mut self, source: Source) -> Result<(), PlayerError>;
    /// Volume 0..=MAX_VOLUME
    fn set_volume(&mut self, level: u8) -> Result<(), PlayerError>;
    /// Tracks are numbered from 1
    fn play(&mut self, track: u16) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    fn resume(&mut self) -> Result<(), PlayerError>;

    fn execute(&mut self, command: Command) -> Result<(), PlayerError> {
        match command {
            Command::Reset => self.reset(),
            Command::SelectSource(source) => self.select_source(source),
            Command::SetVolume(level) => self.set_volume(level),
            Command::Play(track) => self.play(track),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
        }
    }
}
