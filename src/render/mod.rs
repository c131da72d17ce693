//! Frame production and terminal presentation
//!
//! [`Renderer`] turns a [`GameState`](crate::game::GameState) into a list of
//! [`DrawCommand`]s in screen pixels. [`FrameWidget`] rasterizes such a list
//! onto a ratatui buffer.

pub mod draw;
pub mod frame;
pub mod renderer;

pub use draw::{DrawCommand, Size};
pub use frame::FrameWidget;
pub use renderer::Renderer;
