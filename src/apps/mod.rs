// The Pokédex box application: one owner for every handle and the
// single control loop.
//
// Boot: reset player -> settle -> volume -> source -> play start track
// Loop: [RenderFrame, PollButton(Primary), PollButton(Secondary), Settle]
//
// Button polls block while a button is held, so the animation and
// the other button wait for the press to end.

pub mod animation;
pub mod playback;

use log::info;
use smart_leds::{RGB8, SmartLedsWrite};

use crate::board::action::map_event;
use crate::config::Config;
use crate::drivers::audio::{AudioPlayer, Command};
use crate::drivers::input::InputDriver;
use crate::kernel::clock::Clock;
use crate::kernel::job::{CYCLE, Job};

pub use animation::Animator;
pub use playback::{Change, Playback, PlaybackState, Status};

pub struct Jukebox<A, W, P, C> {
    player: A,
    animator: Animator<W>,
    input: InputDriver<P>,
    clock: C,
    playback: Playback,
    config: Config,
}

impl<A, W, P, C> Jukebox<A, W, P, C>
where
    A: AudioPlayer,
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
    P: embedded_hal::digital::InputPin,
    C: Clock,
{
    pub fn new(player: A, leds: W, primary: P, secondary: P, clock: C, config: Config) -> Self {
        let config = config.sanitized();
        Self {
            player,
            animator: Animator::new(leds, config.row_delay_ms),
            input: InputDriver::new(primary, secondary, &config),
            clock,
            playback: Playback::new(&config),
            config,
        }
    }

    /// Bring the player up and start the first track.
    pub fn boot(&mut self) {
        info!("player: reset");
        self.issue(Command::Reset);
        self.clock.sleep_ms(self.config.reset_settle_ms);

        self.issue(Command::SetVolume(self.playback.state().volume));
        self.issue(Command::SelectSource(self.config.source));
        self.playback.start(&mut self.player);
        info!(
            "player ready: {} tracks on {}",
            self.playback.max_tracks(),
            self.config.source
        );
    }

    fn issue(&mut self, command: Command) {
        playback::report(command, self.player.execute(command));
    }

    /// One pass of the control loop.
    pub fn run_cycle(&mut self) {
        for job in CYCLE {
            match job {
                Job::RenderFrame => self.animator.paint_in(&mut self.clock),
                Job::PollButton(button) => {
                    let Some(event) = self.input.poll(button, &mut self.clock) else {
                        continue;
                    };
                    let action = map_event(event);
                    if self.playback.handle(action, &mut self.player).is_none() {
                        info!("{}: nothing to do", action);
                    }
                }
                Job::Settle => self.clock.sleep_ms(self.config.loop_delay_ms),
            }
        }
    }

    pub fn run(mut self) -> ! {
        loop {
            self.run_cycle();
        }
    }

    pub fn state(&self) -> &PlaybackState {
        self.playback.state()
    }

    pub fn player(&self) -> &A {
        &self.player
    }

    pub fn animator(&self) -> &Animator<W> {
        &self.animator
    }
}
