use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::draw::{DrawCommand, Size};
use super::frame::FrameWidget;
use crate::color::Rgb565;
use crate::game::{GameConfig, GameState, Position};
use crate::metrics::GameMetrics;

/// Produces the game's frames
pub struct Renderer {
    segment_size: i32,
    food_per_level: u32,
    screen_width: i32,
    screen_height: i32,
}

impl Renderer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            segment_size: config.segment_size,
            food_per_level: config.food_per_level,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
        }
    }

    /// Draw commands for one frame of the game screen
    ///
    /// A terminal state replaces the board with its banner.
    pub fn draw_commands(&self, state: &GameState) -> Vec<DrawCommand> {
        let mut commands = vec![DrawCommand::Clear(Rgb565::BLACK)];
        let center_x = self.screen_width / 2;
        let center_y = self.screen_height / 2;
        let score = format!("Score: {}", state.score);

        if state.game_over {
            commands.push(DrawCommand::text(
                Position::new(center_x - 50, center_y - 20),
                "GAME OVER",
                Rgb565::RED,
            ));
            commands.push(DrawCommand::text(
                Position::new(center_x - 40, center_y),
                score,
                Rgb565::WHITE,
            ));
            commands.push(DrawCommand::text(
                Position::new(center_x - 60, center_y + 20),
                "Press any key",
                Rgb565::WHITE,
            ));
            return commands;
        }

        if state.game_won {
            commands.push(DrawCommand::text(
                Position::new(center_x - 40, center_y - 20),
                "YOU WIN!",
                Rgb565::GREEN,
            ));
            commands.push(DrawCommand::text(
                Position::new(center_x - 40, center_y),
                score,
                Rgb565::WHITE,
            ));
            return commands;
        }

        let cell = Size::square(self.segment_size);
        for (i, segment) in state.snake.body.iter().enumerate() {
            // Head is brighter
            let color = if i == 0 {
                Rgb565::GREEN
            } else {
                Rgb565::DARK_GREEN
            };
            commands.push(DrawCommand::fill_rect(*segment, cell, color));
        }

        if state.food.active {
            commands.push(DrawCommand::fill_rect(
                state.food.position,
                cell,
                state.food.color,
            ));
        }

        let hud = [
            score,
            format!("Lives: {}", state.lives),
            format!("Level: {}", state.level),
            format!("Food: {}/{}", state.food_eaten, self.food_per_level),
        ];
        for (line, text) in hud.into_iter().enumerate() {
            commands.push(DrawCommand::text(
                Position::new(5, 5 + 15 * line as i32),
                text,
                Rgb565::WHITE,
            ));
        }

        commands
    }

    /// Lay out the game screen with a stats header and a controls footer
    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(metrics);
        frame.render_widget(stats, chunks[0]);

        let (width, height) =
            FrameWidget::required_size(self.screen_width, self.screen_height, self.segment_size);
        let outer = centered(chunks[1], width.saturating_add(2), height.saturating_add(2));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let screen = block.inner(outer);
        frame.render_widget(block, outer);

        let commands = self.draw_commands(state);
        frame.render_widget(FrameWidget::new(&commands, self.segment_size), screen);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_stats(&self, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{} ({} won)", metrics.games_played, metrics.games_won),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" back | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
