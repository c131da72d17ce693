//! 16-bit RGB565 colors, the native pixel format of the target display.

/// A color packed as RGB565 (5 bits red, 6 bits green, 5 bits blue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const DARK_GREEN: Self = Self(0x03E0);

    /// Expand to 8-bit channels, replicating the high bits into the low bits
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let r5 = ((self.0 >> 11) & 0x1F) as u8;
        let g6 = ((self.0 >> 5) & 0x3F) as u8;
        let b5 = (self.0 & 0x1F) as u8;

        ((r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2))
    }
}

impl From<Rgb565> for ratatui::style::Color {
    fn from(color: Rgb565) -> Self {
        let (r, g, b) = color.to_rgb8();
        ratatui::style::Color::Rgb(r, g, b)
    }
}
