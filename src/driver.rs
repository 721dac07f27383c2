//! Headless frame driver
//!
//! Sits between a frame loop and the arena: accumulates frame times until a
//! minimum physical step is reached, owns pause/restart, and stops advancing
//! once the game is won or lost. Renderers read the arena through `arena()`.

use crate::consts::MIN_SIM_STEP;
use crate::params::{ArenaParams, ConfigError};
use crate::sim::{Arena, ArenaPhase, Event};

/// Drives an `Arena` from a variable-rate frame loop
#[derive(Debug, Clone)]
pub struct Driver {
    arena: Arena,
    /// Frame time not yet applied to the arena
    accumulator: f32,
    paused: bool,
}

impl Driver {
    pub fn new(params: &ArenaParams) -> Result<Self, ConfigError> {
        Ok(Self::from_arena(Arena::new(params)?))
    }

    pub fn from_arena(arena: Arena) -> Self {
        Self {
            arena,
            accumulator: 0.0,
            paused: false,
        }
    }

    /// Feed one frame's elapsed time
    ///
    /// Frame times are coalesced until their sum exceeds `MIN_SIM_STEP`, then
    /// applied as one step. Returns true if the arena advanced.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.arena.phase().is_terminal() {
            self.paused = true;
        }
        if self.paused || !dt.is_finite() || dt < 0.0 {
            return false;
        }

        let pending = self.accumulator + dt;
        if pending <= MIN_SIM_STEP {
            self.accumulator = pending;
            return false;
        }

        self.arena.advance_time(pending);
        self.accumulator = 0.0;
        if self.arena.phase().is_terminal() {
            log::info!("{}", self.status_text());
            self.paused = true;
        }
        true
    }

    /// Forward an input event to the arena
    pub fn accept(&mut self, event: &Event) {
        self.arena.accept(event);
    }

    /// Flip pause; a finished game stays paused
    pub fn toggle_pause(&mut self) {
        if self.arena.phase().is_terminal() {
            return;
        }
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Rebuild the arena from its parameters and wait paused for the player
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.arena.restart()?;
        self.accumulator = 0.0;
        self.paused = true;
        Ok(())
    }

    /// Caption for the pause control
    pub fn status_text(&self) -> &'static str {
        match self.arena.phase() {
            ArenaPhase::Won => "You Won!",
            ArenaPhase::Lost => "You Lost!",
            ArenaPhase::Running if self.paused => "Play",
            ArenaPhase::Running => "Pause",
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }
}
