use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable constants of the game
///
/// Defaults reproduce the classic handheld build: a 320x240 screen split into
/// 8 pixel cells, three lives, and five levels of ten food items each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen width in pixels
    pub screen_width: i32,
    /// Screen height in pixels
    pub screen_height: i32,
    /// Edge length of one grid cell in pixels
    pub segment_size: i32,
    /// Hard cap on the number of body segments
    pub max_snake_length: usize,
    /// Length of the snake after a reset or a lost life
    pub initial_snake_length: usize,
    /// Lives at the start of a game
    pub initial_lives: u32,

    /// Milliseconds between moves at the start of a game
    pub initial_speed_ms: u64,
    /// How much faster (in ms) the snake gets per food item
    pub speed_increase_ms: u64,
    /// Fastest allowed move interval
    pub min_speed_ms: u64,

    /// Score awarded per food item
    pub points_per_food: u32,
    /// Food items needed to advance a level
    pub food_per_level: u32,
    /// Reaching this level wins the game
    pub winning_level: u32,
    /// Random placement attempts before food spawn falls back to a free-cell scan
    pub spawn_attempts: u32,

    /// Host frame rate in Hz
    pub frame_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 320,
            screen_height: 240,
            segment_size: 8,
            max_snake_length: 100,
            initial_snake_length: 3,
            initial_lives: 3,
            initial_speed_ms: 200,
            speed_increase_ms: 10,
            min_speed_ms: 50,
            points_per_food: 10,
            food_per_level: 10,
            winning_level: 5,
            spawn_attempts: 100,
            frame_rate: 15,
        }
    }
}

impl GameConfig {
    /// Number of grid columns
    pub fn columns(&self) -> i32 {
        self.screen_width / self.segment_size
    }

    /// Number of grid rows
    pub fn rows(&self) -> i32 {
        self.screen_height / self.segment_size
    }

    /// Top-left pixel of the head's starting cell: two cells left of center
    pub fn start_cell(&self) -> (i32, i32) {
        (
            (self.columns() / 2 - 2) * self.segment_size,
            (self.rows() / 2) * self.segment_size,
        )
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.segment_size > 0, "segment_size must be positive");
        ensure!(
            self.screen_width % self.segment_size == 0
                && self.screen_height % self.segment_size == 0,
            "screen size {}x{} is not a multiple of segment_size {}",
            self.screen_width,
            self.screen_height,
            self.segment_size
        );
        ensure!(
            self.initial_snake_length >= 1,
            "initial_snake_length must be at least 1"
        );
        ensure!(
            self.initial_snake_length <= self.max_snake_length,
            "initial_snake_length {} exceeds max_snake_length {}",
            self.initial_snake_length,
            self.max_snake_length
        );
        ensure!(
            self.columns() > 0 && self.rows() > 0,
            "screen {}x{} holds no {} pixel cell",
            self.screen_width,
            self.screen_height,
            self.segment_size
        );
        // The starting body extends left from the head
        let (head_x, head_y) = self.start_cell();
        let tail_x = head_x - (self.initial_snake_length as i32 - 1) * self.segment_size;
        ensure!(
            tail_x >= 0 && head_x < self.screen_width,
            "a snake of length {} does not fit on a {} pixel wide screen",
            self.initial_snake_length,
            self.screen_width
        );
        ensure!(
            head_y >= 0 && head_y < self.screen_height,
            "the starting row does not fit on a {} pixel high screen",
            self.screen_height
        );
        ensure!(self.initial_lives > 0, "initial_lives must be positive");
        ensure!(
            self.min_speed_ms <= self.initial_speed_ms,
            "min_speed_ms {} is slower than initial_speed_ms {}",
            self.min_speed_ms,
            self.initial_speed_ms
        );
        ensure!(self.food_per_level > 0, "food_per_level must be positive");
        ensure!(self.winning_level > 1, "winning_level must be above 1");
        ensure!(self.frame_rate > 0, "frame_rate must be positive");
        Ok(())
    }
}
