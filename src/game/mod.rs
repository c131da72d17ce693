//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Time enters only as a millisecond reading passed to [`GameEngine::tick`].

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Button, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, GameEvent, StepResult};
pub use state::{CollisionType, Food, GameState, Position, Snake};
