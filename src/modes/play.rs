use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{Button, GameConfig, GameEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::session::{MonotonicClock, Session, SessionSummary};

/// Plays the game in the terminal at the configured frame rate
pub struct PlayMode {
    session: Session<MonotonicClock>,
    metrics: GameMetrics,
    input_handler: InputHandler,
    should_quit: bool,
    /// Last button pressed since the previous frame
    pending_button: Option<Button>,
}

impl PlayMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let session = Session::start(config, MonotonicClock::new(), seed)?;

        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_button: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    /// Stop the session and report how it ended
    pub fn finish(self) -> SessionSummary {
        info!(
            games = self.metrics.games_played,
            best = self.metrics.high_score,
            "leaving play mode"
        );
        self.session.stop()
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Update and render once per frame; movement speed is throttled by the engine
        let frame_rate = self.session.config().frame_rate.max(1);
        let frame_interval = Duration::from_secs(1) / frame_rate;
        let mut frame_timer = interval(frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(event) = maybe_event {
                        let event = event.context("Failed to read terminal event")?;
                        self.handle_event(event);
                    }
                }

                // Update then render
                _ = frame_timer.tick() => {
                    self.update_game();
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.session
                            .renderer()
                            .render(frame, self.session.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Button(Button::Back) => {
                    debug!("back pressed, closing the game");
                    self.should_quit = true;
                }
                KeyAction::Button(button) => {
                    self.pending_button = Some(button);
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let input = self.pending_button.take();
        let result = self.session.update(input);

        for event in &result.events {
            match event {
                GameEvent::GameOver => self.metrics.on_game_over(self.session.state().score),
                GameEvent::Won => self.metrics.on_game_won(self.session.state().score),
                GameEvent::Reset => self.metrics.on_game_start(),
                _ => {}
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
