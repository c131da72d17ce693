//! Pico Snake - the classic Snake game of a 320x240 handheld console
//!
//! This library provides:
//! - Core game logic (game module)
//! - Draw-command rendering and its terminal rasterizer (render module)
//! - Keyboard to button mapping (input module)
//! - Session lifecycle and clocks (session module)
//! - The terminal play loop (modes module)

pub mod color;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
