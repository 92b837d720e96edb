// Semantic actions decoupled from physical buttons.
//
// The playback state machine matches on Action, never on Button.
// map_event translates a classified press into what it means:
//
//   Primary   short -> TogglePlayback   long -> VolumeDown
//   Secondary short -> NextTrack        long -> VolumeUp

use crate::board::button::Button;
use crate::drivers::input::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pause if playing, resume if paused
    TogglePlayback,
    /// Advance to the next track, wrapping to the first
    NextTrack,
    VolumeUp,
    VolumeDown,
}

impl Action {
    pub const fn name(self) -> &'static str {
        match self {
            Action::TogglePlayback => "Toggle",
            Action::NextTrack => "Next Track",
            Action::VolumeUp => "Vol Up",
            Action::VolumeDown => "Vol Down",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Translate a classified hardware event into an action.
pub const fn map_event(event: Event) -> Action {
    match event {
        Event::Short(Button::Primary) => Action::TogglePlayback,
        Event::Long(Button::Primary) => Action::VolumeDown,
        Event::Short(Button::Secondary) => Action::NextTrack,
        Event::Long(Button::Secondary) => Action::VolumeUp,
    }
}
