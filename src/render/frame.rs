use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use super::draw::DrawCommand;

/// Terminal columns used for one grid cell; terminal cells are about twice as tall as wide
const COLUMNS_PER_CELL: i32 = 2;
const FILL: &str = "█";

/// Rasterizes draw commands onto a terminal buffer
///
/// One grid cell of `segment_size` pixels becomes two columns by one row.
/// Anything outside the widget area is clipped.
pub struct FrameWidget<'a> {
    commands: &'a [DrawCommand],
    segment_size: i32,
}

impl<'a> FrameWidget<'a> {
    pub fn new(commands: &'a [DrawCommand], segment_size: i32) -> Self {
        Self {
            commands,
            segment_size,
        }
    }

    /// Terminal size needed to show a full screen of the given pixel size
    pub fn required_size(screen_width: i32, screen_height: i32, segment_size: i32) -> (u16, u16) {
        let columns = screen_width * COLUMNS_PER_CELL / segment_size;
        let rows = screen_height / segment_size;
        (columns.max(0) as u16, rows.max(0) as u16)
    }

    fn column(&self, x: i32) -> i32 {
        x * COLUMNS_PER_CELL / self.segment_size
    }

    fn row(&self, y: i32) -> i32 {
        y / self.segment_size
    }

    fn fill(&self, area: Rect, buf: &mut Buffer, columns: (i32, i32), rows: (i32, i32), color: Color) {
        let col_end = columns.1.min(area.width as i32);
        let row_end = rows.1.min(area.height as i32);

        for row in rows.0.max(0)..row_end {
            for col in columns.0.max(0)..col_end {
                let x = area.x + col as u16;
                let y = area.y + row as u16;
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(FILL).set_fg(color);
                }
            }
        }
    }
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.segment_size <= 0 {
            return;
        }

        for command in self.commands {
            match command {
                DrawCommand::Clear(color) => {
                    buf.set_style(area, Style::default().bg((*color).into()));
                    for y in area.top()..area.bottom() {
                        for x in area.left()..area.right() {
                            if let Some(cell) = buf.cell_mut((x, y)) {
                                cell.set_symbol(" ");
                            }
                        }
                    }
                }
                DrawCommand::FillRect {
                    origin,
                    size,
                    color,
                } => {
                    let columns = (
                        self.column(origin.x),
                        self.column(origin.x + size.width + self.segment_size / 2 - 1),
                    );
                    let rows = (
                        self.row(origin.y),
                        self.row(origin.y + size.height + self.segment_size - 1),
                    );
                    self.fill(area, buf, columns, rows, (*color).into());
                }
                DrawCommand::Text {
                    origin,
                    text,
                    color,
                } => {
                    let col = self.column(origin.x);
                    let row = self.row(origin.y);
                    if col < 0 || row < 0 || col >= area.width as i32 || row >= area.height as i32 {
                        continue;
                    }
                    let max_width = area.width as usize - col as usize;
                    buf.set_stringn(
                        area.x + col as u16,
                        area.y + row as u16,
                        text,
                        max_width,
                        Style::default().fg((*color).into()),
                    );
                }
            }
        }
    }
}
