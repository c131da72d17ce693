//! One game session: the owned state, its engine and the clock driving it

use anyhow::{Context, Result};
use std::cell::Cell;
use std::time::Instant;
use tracing::info;

use crate::game::{Button, GameConfig, GameEngine, GameState, StepResult};
use crate::render::{DrawCommand, Renderer};

/// Millisecond time source read once per update
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since the clock was created
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Final numbers of a stopped session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub moves: u32,
    pub game_over: bool,
    pub game_won: bool,
}

/// Owns the game state for as long as the game is open
pub struct Session<C: Clock = MonotonicClock> {
    engine: GameEngine,
    state: GameState,
    renderer: Renderer,
    clock: C,
}

impl<C: Clock> Session<C> {
    /// Validate the configuration and set up a fresh game
    ///
    /// With a `seed`, food placement is reproducible.
    pub fn start(config: GameConfig, clock: C, seed: Option<u64>) -> Result<Self> {
        config.validate().context("Invalid game configuration")?;

        let renderer = Renderer::new(&config);
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };
        let state = engine.reset();

        info!(
            width = engine.config().screen_width,
            height = engine.config().screen_height,
            seed = ?seed,
            "session started"
        );

        Ok(Self {
            engine,
            state,
            renderer,
            clock,
        })
    }

    /// Feed one frame's input to the game
    pub fn update(&mut self, input: Option<Button>) -> StepResult {
        let now_ms = self.clock.now_ms();
        self.engine.tick(&mut self.state, input, now_ms)
    }

    /// Draw commands for the current frame
    pub fn render(&self) -> Vec<DrawCommand> {
        self.renderer.draw_commands(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// End the session, releasing its state
    pub fn stop(self) -> SessionSummary {
        let summary = SessionSummary {
            score: self.state.score,
            level: self.state.level,
            lives: self.state.lives,
            moves: self.state.moves,
            game_over: self.state.game_over,
            game_won: self.state.game_won,
        };
        info!(score = summary.score, level = summary.level, "session stopped");
        summary
    }
}
