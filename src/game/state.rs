use super::action::Direction;
use super::config::GameConfig;
use crate::color::Rgb565;

/// A pixel position on the screen, aligned to the segment grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one grid cell of `step` pixels in a direction
    pub fn stepped(&self, direction: Direction, step: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * step, dy * step)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction of the last move
    pub direction: Direction,
    /// Direction the next move will take
    pub next_direction: Direction,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize, step: i32) -> Self {
        let mut body = Vec::with_capacity(length);
        body.push(head);

        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx * step, -dy * step));
        }

        Self {
            body,
            direction,
            next_direction: direction,
        }
    }

    /// The starting snake: centered, facing right
    pub fn initial(config: &GameConfig) -> Self {
        let (x, y) = config.start_cell();
        let head = Position::new(x, y);
        Self::new(
            head,
            Direction::Right,
            config.initial_snake_length,
            config.segment_size,
        )
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Shift every segment into its predecessor's place and put the head at `new_head`
    ///
    /// With `grow` the tail is kept, so the snake becomes one segment longer.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food {
    pub position: Position,
    pub active: bool,
    pub color: Rgb565,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            active: true,
            color: Rgb565::RED,
        }
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state of one session
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub food_eaten: u32,
    pub game_over: bool,
    pub game_won: bool,
    /// Clock reading of the last move, 0 after a reset
    pub last_move_ms: u64,
    /// Milliseconds between moves
    pub move_speed_ms: u64,
    /// Moves performed since the last reset
    pub moves: u32,
    pub screen_width: i32,
    pub screen_height: i32,
}

impl GameState {
    /// Create a fresh game with the given snake and food
    pub fn new(snake: Snake, food: Food, config: &GameConfig) -> Self {
        Self {
            snake,
            food,
            score: 0,
            lives: config.initial_lives,
            level: 1,
            food_eaten: 0,
            game_over: false,
            game_won: false,
            last_move_ms: 0,
            move_speed_ms: config.initial_speed_ms,
            moves: 0,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
        }
    }

    /// Whether the game sits in a state only a reset can leave
    pub fn is_terminal(&self) -> bool {
        self.game_over || self.game_won
    }

    /// Check if a position is within the screen bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.screen_width && pos.y >= 0 && pos.y < self.screen_height
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }
}
