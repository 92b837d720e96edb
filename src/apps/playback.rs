// Playback state machine: track, volume, playing flag.
//
//   TogglePlayback  playing -> Pause, paused -> Resume
//   NextTrack       track % max + 1, always Play (forces playing)
//   VolumeUp/Down   +-1, clamped to 0..=30; no command at a bound
//
// apply() is the pure transition; handle() also drives the player
// and reports the outcome on the status log. A failed command is
// logged and the state change stands; the loop keeps going.

use core::fmt;

use log::{info, warn};

use crate::board::action::Action;
use crate::config::Config;
use crate::drivers::audio::{AudioPlayer, Command, MAX_VOLUME, PlayerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_track: u16, // 1..=max_tracks
    pub volume: u8,         // 0..=MAX_VOLUME
}

/// Human-readable outcome of a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Paused,
    Resumed,
    Playing(u16),
    VolumeLowered(u8),
    VolumeRaised(u8),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Paused => write!(f, "music paused"),
            Status::Resumed => write!(f, "music resumed"),
            Status::Playing(t) => write!(f, "playing track {}", t),
            Status::VolumeLowered(v) => write!(f, "volume lowered to {}", v),
            Status::VolumeRaised(v) => write!(f, "volume raised to {}", v),
        }
    }
}

/// One accepted transition: the command to issue and what to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub command: Command,
    pub status: Status,
}

pub struct Playback {
    state: PlaybackState,
    max_tracks: u16,
}

impl Playback {
    /// Stopped, positioned at the configured start track and volume.
    pub fn new(config: &Config) -> Self {
        let config = config.sanitized();
        Self {
            state: PlaybackState {
                is_playing: false,
                current_track: config.start_track,
                volume: config.initial_volume,
            },
            max_tracks: config.max_tracks,
        }
    }

    /// Resume from an arbitrary state; out-of-range fields are clamped.
    pub fn with_state(state: PlaybackState, max_tracks: u16) -> Self {
        let max_tracks = max_tracks.max(1);
        Self {
            state: PlaybackState {
                is_playing: state.is_playing,
                current_track: state.current_track.clamp(1, max_tracks),
                volume: state.volume.min(MAX_VOLUME),
            },
            max_tracks,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn max_tracks(&self) -> u16 {
        self.max_tracks
    }

    pub fn apply(&mut self, action: Action) -> Option<Change> {
        let s = &mut self.state;
        match action {
            Action::TogglePlayback => {
                s.is_playing = !s.is_playing;
                Some(if s.is_playing {
                    Change {
                        command: Command::Resume,
                        status: Status::Resumed,
                    }
                } else {
                    Change {
                        command: Command::Pause,
                        status: Status::Paused,
                    }
                })
            }
            Action::NextTrack => {
                s.current_track = s.current_track % self.max_tracks + 1;
                s.is_playing = true;
                Some(Change {
                    command: Command::Play(s.current_track),
                    status: Status::Playing(s.current_track),
                })
            }
            Action::VolumeDown => {
                if s.volume == 0 {
                    return None;
                }
                s.volume -= 1;
                Some(Change {
                    command: Command::SetVolume(s.volume),
                    status: Status::VolumeLowered(s.volume),
                })
            }
            Action::VolumeUp => {
                if s.volume >= MAX_VOLUME {
                    return None;
                }
                s.volume += 1;
                Some(Change {
                    command: Command::SetVolume(s.volume),
                    status: Status::VolumeRaised(s.volume),
                })
            }
        }
    }

    /// Apply `action` and issue the resulting command.
    pub fn handle<A: AudioPlayer>(&mut self, action: Action, player: &mut A) -> Option<Change> {
        let change = self.apply(action)?;
        report(change.command, player.execute(change.command));
        info!("{}", change.status);
        Some(change)
    }

    /// Start the current track and mark playback as running.
    pub fn start<A: AudioPlayer>(&mut self, player: &mut A) {
        let command = Command::Play(self.state.current_track);
        report(command, player.execute(command));
        self.state.is_playing = true;
        info!("{}", Status::Playing(self.state.current_track));
    }
}

/// Log a failed player command; the caller carries on either way.
pub(super) fn report(command: Command, result: Result<(), PlayerError>) {
    if let Err(e) = result {
        warn!("player: {} failed: {}", command, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::audio::Source;
    use std::vec::Vec;

    #[derive(Default)]
    struct Recorder {
        commands: Vec<Command>,
        fail: bool,
    }

    impl Recorder {
        fn record(&mut self, c: Command) -> Result<(), PlayerError> {
            self.commands.push(c);
            if self.fail {
                Err(PlayerError::DeviceUnavailable)
            } else {
                Ok(())
            }
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

    fn at(is_playing: bool, current_track: u16, volume: u8) -> Playback {
        Playback::with_state(
            PlaybackState {
                is_playing,
                current_track,
                volume,
            },
            20,
        )
    }

    #[test]
    fn toggle_twice_restores_and_issues_pause_then_resume() {
        for playing in [true, false] {
            let mut pb = at(playing, 5, 10);
            let mut player = Recorder::default();
            pb.handle(Action::TogglePlayback, &mut player);
            pb.handle(Action::TogglePlayback, &mut player);
            assert_eq!(pb.state().is_playing, playing);
            let expected = if playing {
                [Command::Pause, Command::Resume]
            } else {
                [Command::Resume, Command::Pause]
            };
            assert_eq!(player.commands, expected);
        }
    }

    #[test]
    fn next_track_wraps_after_last() {
        let mut pb = at(false, 20, 10);
        let change = pb.apply(Action::NextTrack).unwrap();
        assert_eq!(change.command, Command::Play(1));
        assert_eq!(pb.state().current_track, 1);
        assert!(pb.state().is_playing);

        for t in 1..20 {
            let mut pb = at(true, t, 10);
            pb.apply(Action::NextTrack);
            assert_eq!(pb.state().current_track, t + 1);
        }
    }

    #[test]
    fn volume_clamps_at_both_ends() {
        let mut pb = at(true, 1, 30);
        let mut player = Recorder::default();
        for _ in 0..5 {
            assert_eq!(pb.handle(Action::VolumeUp, &mut player), None);
        }
        assert_eq!(pb.state().volume, 30);

        let mut pb = at(true, 1, 2);
        for _ in 0..5 {
            pb.handle(Action::VolumeDown, &mut player);
        }
        assert_eq!(pb.state().volume, 0);
        assert_eq!(
            player.commands,
            [Command::SetVolume(1), Command::SetVolume(0)]
        );
    }

    #[test]
    fn volume_steps_report_direction() {
        let mut pb = at(true, 1, 12);
        assert_eq!(
            pb.apply(Action::VolumeUp).map(|c| c.status),
            Some(Status::VolumeRaised(13))
        );
        assert_eq!(
            pb.apply(Action::VolumeDown).map(|c| c.status),
            Some(Status::VolumeLowered(12))
        );
        assert_eq!(Status::VolumeLowered(12).to_string(), "volume lowered to 12");
        assert_eq!(Status::Playing(3).to_string(), "playing track 3");
    }

    #[test]
    fn driver_failure_keeps_the_transition() {
        let mut pb = at(true, 3, 12);
        let mut player = Recorder {
            fail: true,
            ..Default::default()
        };
        assert!(pb.handle(Action::NextTrack, &mut player).is_some());
        assert_eq!(pb.state().current_track, 4);
        assert_eq!(player.commands, [Command::Play(4)]);
    }

    #[test]
    fn new_starts_stopped_at_configured_track() {
        let pb = Playback::new(&Config::defaults());
        assert_eq!(
            *pb.state(),
            PlaybackState {
                is_playing: false,
                current_track: 1,
                volume: 12
            }
        );
        assert_eq!(pb.max_tracks(), 20);

        let mut pb = pb;
        let mut player = Recorder::default();
        pb.start(&mut player);
        assert!(pb.state().is_playing);
        assert_eq!(player.commands, [Command::Play(1)]);
    }

    #[test]
    fn out_of_range_state_is_clamped() {
        let pb = at(true, 0, 200);
        assert_eq!(pb.state().current_track, 1);
        assert_eq!(pb.state().volume, 30);
    }
}
