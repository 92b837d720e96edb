//! Physical buttons on the Pokédex box
//!
//! Two momentary switches to ground with internal pull-ups, so a
//! pressed button reads LOW. The front button is the primary
//! (play/pause, hold for volume down); the side button is the
//! secondary (next track, hold for volume up).

use super::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
}

impl Button {
    pub const ALL: [Button; 2] = [Button::Primary, Button::Secondary];

    pub const fn name(self) -> &'static str {
        match self {
            Button::Primary => "Play/Pause",
            Button::Secondary => "Next",
        }
    }

    pub const fn gpio(self) -> u8 {
        match self {
            Button::Primary => pins::BTN_PRIMARY,
            Button::Secondary => pins::BTN_SECONDARY,
        }
    }
}

impl core::fmt::Display for Button {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
