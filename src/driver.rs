//! Frame-by-frame orchestration.
//!
//! `Game` owns the one `GameState` and the RNG.  Each call to `frame` is one
//! tick: clear, reset if the previous tick ended the game, simulate, draw,
//! present.  Pacing between frames is the scheduler's job.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::compute::{init_state, tick};
use crate::display::{self, RenderSurface};
use crate::entities::{GameOverCause, GameState};
use crate::input::InputState;

/// Decides when the next frame may start.
pub trait FrameScheduler {
    /// Block until the next frame is due.
    fn wait_next_frame(&mut self);
}

/// Fixed frame budget: sleeps whatever is left of it since the last call.
pub struct FixedRate {
    frame: Duration,
    frame_start: Instant,
}

impl FixedRate {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / fps.max(1),
            frame_start: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl FrameScheduler for FixedRate {
    fn wait_next_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

pub struct Game<R: Rng> {
    state: GameState,
    rng: R,
    /// Number of resets so far.
    resets: u32,
}

impl<R: Rng> Game<R> {
    pub fn new(width: f32, height: f32, mut rng: R) -> Self {
        let state = init_state(width, height, &mut rng);
        Self {
            state,
            rng,
            resets: 0,
        }
    }

    /// Start from an existing state.
    pub fn with_state(state: GameState, rng: R) -> Self {
        Self {
            state,
            rng,
            resets: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }

    /// Throw the current run away and start a fresh one on the same field.
    pub fn reset(&mut self) {
        self.state = init_state(self.state.width, self.state.height, &mut self.rng);
        self.resets += 1;
        log::info!("game reset (#{})", self.resets);
    }

    /// Run one tick and draw it.  Returns what ended the game on this tick,
    /// if anything did.
    pub fn frame(
        &mut self,
        input: &InputState,
        surface: &mut impl RenderSurface,
    ) -> io::Result<Option<GameOverCause>> {
        if self.state.is_over() {
            self.reset();
        }

        let (next, cause) = tick(&self.state, input, &mut self.rng);
        self.state = next;
        if let Some(cause) = cause {
            log::info!(
                "game over after {} frames, score {}: {:?}",
                self.state.frame,
                self.state.score,
                cause
            );
        }

        display::render(surface, &self.state);
        surface.present()?;
        Ok(cause)
    }
}
