// Runtime tunables for playback, input timing and animation.
// Hardware facts (pins, baud, tick period) stay as consts in board/ and kernel/.

use crate::drivers::audio::{MAX_VOLUME, Source};
use crate::drivers::dfplayer::DEFAULT_ACK_TIMEOUT_MS;
use crate::drivers::input::{LONG_PRESS_MS, POLL_INTERVAL_MS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub initial_volume: u8,    // 0..=30, sent at boot
    pub start_track: u16,      // played at boot
    pub max_tracks: u16,       // tracks on the card; next wraps past this
    pub source: Source,        // storage the player reads from
    pub long_press_ms: u32,    // held at least this long = long press
    pub poll_interval_ms: u32, // button sample period while held
    pub row_delay_ms: u32,     // pause between animation rows
    pub loop_delay_ms: u32,    // idle at the end of each loop pass
    pub reset_settle_ms: u32,  // player boot time after reset
    pub ack_timeout_ms: u32,   // only used with player_ack
    pub player_ack: bool,      // wait for DFPlayer acknowledgements
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    pub const fn defaults() -> Self {
        Self {
            initial_volume: 12,
            start_track: 1,
            max_tracks: 20,
            source: Source::SdCard,
            long_press_ms: LONG_PRESS_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
            row_delay_ms: 100,
            loop_delay_ms: 50,
            reset_settle_ms: 1000,
            ack_timeout_ms: DEFAULT_ACK_TIMEOUT_MS,
            player_ack: false,
        }
    }

    pub fn sanitize(&mut self) {
        self.initial_volume = self.initial_volume.min(MAX_VOLUME);
        self.max_tracks = self.max_tracks.max(1);
        self.start_track = self.start_track.clamp(1, self.max_tracks);
        self.poll_interval_ms = self.poll_interval_ms.max(1);
        self.long_press_ms = self.long_press_ms.max(self.poll_interval_ms);
    }

    pub fn sanitized(mut self) -> Self {
        self.sanitize();
        self
    }
}
