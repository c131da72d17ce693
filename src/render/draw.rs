use crate::color::Rgb565;
use crate::game::Position;

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn square(edge: i32) -> Self {
        Self::new(edge, edge)
    }
}

/// One drawing call against the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// Fill the whole screen
    Clear(Rgb565),
    /// Fill a rectangle whose top-left corner is `origin`
    FillRect {
        origin: Position,
        size: Size,
        color: Rgb565,
    },
    /// Draw a line of text starting at `origin`
    Text {
        origin: Position,
        text: String,
        color: Rgb565,
    },
}

impl DrawCommand {
    pub fn fill_rect(origin: Position, size: Size, color: Rgb565) -> Self {
        Self::FillRect {
            origin,
            size,
            color,
        }
    }

    pub fn text(origin: Position, text: impl Into<String>, color: Rgb565) -> Self {
        Self::Text {
            origin,
            text: text.into(),
            color,
        }
    }
}
