use super::{
    action::Button,
    config::GameConfig,
    state::{CollisionType, Food, GameState, Position, Snake},
};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A terminal game was acknowledged and restarted
    Reset,
    /// The snake advanced one cell
    Moved,
    /// The snake ate the food
    AteFood,
    /// Enough food was eaten to reach a new level
    LevelUp { level: u32 },
    /// The winning level was reached
    Won,
    /// The snake crashed and lost a life
    LifeLost {
        cause: CollisionType,
        lives_left: u32,
    },
    /// The last life was lost
    GameOver,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepResult {
    /// Whether the game is in a terminal state after this tick
    pub terminated: bool,
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
}

impl StepResult {
    /// Whether the snake advanced this tick
    pub fn moved(&self) -> bool {
        self.events.contains(&GameEvent::Moved)
    }

    /// Whether the snake ate food this tick
    pub fn ate_food(&self) -> bool {
        self.events.contains(&GameEvent::AteFood)
    }

    /// Type of collision if one occurred
    pub fn collision(&self) -> Option<CollisionType> {
        self.events.iter().find_map(|event| match event {
            GameEvent::LifeLost { cause, .. } => Some(*cause),
            _ => None,
        })
    }

    fn finish(mut self, state: &GameState) -> Self {
        self.terminated = state.is_terminal();
        self
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: full lives, level 1, starting snake and new food
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::initial(&self.config);
        let food = self.spawn_food(&snake);

        GameState::new(snake, food, &self.config)
    }

    /// Advance the game by one frame
    ///
    /// `input` is the button pressed during the frame, `now_ms` a monotonic
    /// clock reading. The snake only moves once `move_speed_ms` has passed
    /// since its last move; earlier ticks just buffer the requested turn.
    pub fn tick(
        &mut self,
        state: &mut GameState,
        input: Option<Button>,
        now_ms: u64,
    ) -> StepResult {
        let mut result = StepResult::default();

        if state.is_terminal() {
            if input.is_some() {
                *state = self.reset();
                result.events.push(GameEvent::Reset);
                debug!("game restarted");
            }
            return result.finish(state);
        }

        // Buffer the turn; a 180-degree turn would run into the neck
        if let Some(direction) = input.and_then(|button| button.direction()) {
            if !state.snake.direction.is_opposite(direction) {
                state.snake.next_direction = direction;
            }
        }

        if now_ms.saturating_sub(state.last_move_ms) < state.move_speed_ms {
            return result.finish(state);
        }

        state.last_move_ms = now_ms;
        state.snake.direction = state.snake.next_direction;

        let new_head = state
            .snake
            .head()
            .stepped(state.snake.direction, self.config.segment_size);

        if let Some(cause) = self.check_collision(state, new_head) {
            state.lives = state.lives.saturating_sub(1);
            result.events.push(GameEvent::LifeLost {
                cause,
                lives_left: state.lives,
            });

            if state.lives == 0 {
                state.game_over = true;
                result.events.push(GameEvent::GameOver);
                info!(score = state.score, level = state.level, "game over");
            } else {
                debug!(?cause, lives = state.lives, "life lost");
                state.snake = Snake::initial(&self.config);
                state.food = self.spawn_food(&state.snake);
            }
            return result.finish(state);
        }

        let ate_food = state.food.active && new_head == state.food.position;

        if ate_food {
            state.food.active = false;
            state.score += self.config.points_per_food;
            state.food_eaten += 1;
            state.move_speed_ms = state
                .move_speed_ms
                .saturating_sub(self.config.speed_increase_ms)
                .max(self.config.min_speed_ms);
            result.events.push(GameEvent::AteFood);

            if state.food_eaten >= self.config.food_per_level {
                state.level += 1;
                state.food_eaten = 0;
                result.events.push(GameEvent::LevelUp { level: state.level });
                info!(level = state.level, score = state.score, "level up");

                if state.level >= self.config.winning_level {
                    state.game_won = true;
                    result.events.push(GameEvent::Won);
                    info!(score = state.score, "game won");
                    return result.finish(state);
                }
            }
        }

        let grow = ate_food && state.snake.len() < self.config.max_snake_length;
        state.snake.advance(new_head, grow);
        state.moves += 1;
        result.events.push(GameEvent::Moved);

        if ate_food {
            state.food = self.spawn_food(&state.snake);
        }

        result.finish(state)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Place food on a random grid cell not covered by the snake
    ///
    /// Tries `spawn_attempts` random cells first, then picks among the free
    /// cells directly. Only a completely filled board yields food on the snake.
    pub fn spawn_food(&mut self, snake: &Snake) -> Food {
        let columns = self.config.columns();
        let rows = self.config.rows();
        let step = self.config.segment_size;

        let mut candidate = Position::new(0, 0);
        for _ in 0..self.config.spawn_attempts {
            candidate = Position::new(
                self.rng.gen_range(0..columns) * step,
                self.rng.gen_range(0..rows) * step,
            );

            if !snake.body.contains(&candidate) {
                return Food::new(candidate);
            }
        }

        let free: Vec<Position> = (0..rows)
            .flat_map(|row| (0..columns).map(move |col| Position::new(col * step, row * step)))
            .filter(|pos| !snake.body.contains(pos))
            .collect();

        match free.choose(&mut self.rng) {
            Some(&pos) => {
                debug!(free = free.len(), "food placed from free-cell scan");
                Food::new(pos)
            }
            None => {
                warn!("no free cell left, food placed on the snake");
                Food::new(candidate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7)
    }

    /// A fresh game whose first move is due at `t = 200`
    fn fresh_state(engine: &mut GameEngine) -> GameState {
        let mut state = engine.reset();
        state.food = Food::new(Position::new(0, 0));
        state
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert!(!state.is_terminal());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.snake.len(), 3);
        assert!(state.food.active);
        assert!(!state.is_occupied_by_snake(state.food.position));
    }

    #[test]
    fn test_no_move_before_interval() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        let before = state.clone();

        let result = engine.tick(&mut state, Some(Button::Up), 199);

        assert!(!result.moved());
        assert_eq!(state.snake.next_direction, Direction::Up);
        state.snake.next_direction = Direction::Right;
        assert_eq!(state, before);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);

        let result = engine.tick(&mut state, None, 200);

        assert!(result.moved());
        assert!(!result.terminated);
        assert_eq!(state.snake.head(), Position::new(152, 120));
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.last_move_ms, 200);
        assert_eq!(state.moves, 1);

        // Next move is not due until another interval has passed
        let result = engine.tick(&mut state, None, 399);
        assert!(!result.moved());
        let result = engine.tick(&mut state, None, 400);
        assert!(result.moved());
        assert_eq!(state.snake.head(), Position::new(160, 120));
    }

    #[test]
    fn test_turn_applies_on_next_move() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);

        engine.tick(&mut state, Some(Button::Down), 50);
        assert_eq!(state.snake.direction, Direction::Right);

        engine.tick(&mut state, None, 200);
        assert_eq!(state.snake.direction, Direction::Down);
        assert_eq!(state.snake.head(), Position::new(144, 128));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.snake.direction = Direction::Left;
        state.snake.next_direction = Direction::Left;

        engine.tick(&mut state, Some(Button::Right), 10);
        assert_eq!(state.snake.next_direction, Direction::Left);

        engine.tick(&mut state, Some(Button::Up), 20);
        assert_eq!(state.snake.next_direction, Direction::Up);
    }

    #[test]
    fn test_non_directional_input_ignored_while_playing() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        let before = state.clone();

        engine.tick(&mut state, Some(Button::Select), 10);
        engine.tick(&mut state, Some(Button::Back), 20);

        assert_eq!(state, before);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.snake = Snake::new(Position::new(96, 120), Direction::Right, 3, 8);
        state.food = Food::new(Position::new(104, 120));

        let result = engine.tick(&mut state, None, 200);

        assert!(result.ate_food());
        assert_eq!(state.snake.head(), Position::new(104, 120));
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score, 10);
        assert_eq!(state.food_eaten, 1);
        assert_eq!(state.move_speed_ms, 190);
        assert!(state.food.active);
        assert_ne!(state.food.position, Position::new(104, 120));
        assert!(!state.is_occupied_by_snake(state.food.position));
    }

    #[test]
    fn test_food_consumption_off_grid_head() {
        // Collision is plain position equality, so an unaligned row still eats
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.snake = Snake::new(Position::new(100, 120), Direction::Right, 3, 8);
        state.food = Food::new(Position::new(108, 120));

        let result = engine.tick(&mut state, None, 200);

        assert!(result.ate_food());
        assert_eq!(state.snake.head(), Position::new(108, 120));
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.score, 10);
        assert!(state.food.active);
        assert_ne!(state.food.position, Position::new(108, 120));
    }

    #[test]
    fn test_odd_cell_counts_keep_snake_on_grid() {
        let config = GameConfig {
            screen_width: 328,
            screen_height: 232,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 5);
        let mut state = engine.reset();

        let head = state.snake.head();
        assert_eq!(head, Position::new(144, 112));
        assert!(state.snake.body.iter().all(|pos| pos.x % 8 == 0 && pos.y % 8 == 0));

        state.food = Food::new(head.stepped(Direction::Right, 8));
        let result = engine.tick(&mut state, None, 200);
        assert!(result.ate_food());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_speed_is_floored() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.move_speed_ms = 55;
        state.food = Food::new(Position::new(152, 120));

        engine.tick(&mut state, None, 200);
        assert_eq!(state.move_speed_ms, 50);

        let head = state.snake.head();
        state.food = Food::new(head.stepped(Direction::Right, 8));
        engine.tick(&mut state, None, 250);
        assert_eq!(state.move_speed_ms, 50);
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_inactive_food_is_not_eaten() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.food = Food::new(Position::new(152, 120));
        state.food.active = false;

        let result = engine.tick(&mut state, None, 200);

        assert!(!result.ate_food());
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_level_up_every_ten_food() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.food_eaten = 9;
        state.food = Food::new(Position::new(152, 120));

        let result = engine.tick(&mut state, None, 200);

        assert!(result.events.contains(&GameEvent::LevelUp { level: 2 }));
        assert_eq!(state.level, 2);
        assert_eq!(state.food_eaten, 0);
        assert_eq!(state.snake.len(), 4);
        assert!(!state.game_won);
    }

    #[test]
    fn test_win_at_level_five() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.level = 4;
        state.food_eaten = 9;
        state.score = 390;
        state.food = Food::new(Position::new(152, 120));
        let body_before = state.snake.body.clone();

        let result = engine.tick(&mut state, None, 200);

        assert!(result.terminated);
        assert_eq!(
            result.events,
            vec![
                GameEvent::AteFood,
                GameEvent::LevelUp { level: 5 },
                GameEvent::Won
            ]
        );
        assert!(state.game_won);
        assert!(!state.game_over);
        assert_eq!(state.score, 400);
        assert_eq!(state.snake.body, body_before);
        assert!(!state.food.active);
    }

    #[test]
    fn test_won_game_stays_frozen_until_input() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.game_won = true;
        let before = state.clone();

        let result = engine.tick(&mut state, None, 10_000);
        assert!(result.terminated);
        assert_eq!(state, before);

        let result = engine.tick(&mut state, Some(Button::Select), 10_100);
        assert_eq!(result.events, vec![GameEvent::Reset]);
        assert!(!state.game_won);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_growth_capped_at_max_length() {
        let config = GameConfig {
            max_snake_length: 3,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 1);
        let mut state = fresh_state(&mut engine);
        state.food = Food::new(Position::new(152, 120));

        let result = engine.tick(&mut state, None, 200);

        assert!(result.ate_food());
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(152, 120));
        assert_eq!(state.score, 10);
        assert!(state.food.active);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.snake = Snake::new(Position::new(0, 120), Direction::Left, 3, 8);

        let result = engine.tick(&mut state, None, 200);

        assert!(!result.terminated);
        assert_eq!(result.collision(), Some(CollisionType::Wall));
        assert_eq!(state.lives, 2);
        assert_eq!(state.snake, Snake::initial(engine.config()));
        assert!(!state.game_over);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.snake.body = vec![
            Position::new(40, 40),
            Position::new(48, 40),
            Position::new(48, 48),
            Position::new(40, 48),
            Position::new(32, 48),
        ];
        state.snake.direction = Direction::Left;
        state.snake.next_direction = Direction::Left;

        let result = engine.tick(&mut state, Some(Button::Down), 200);

        assert_eq!(result.collision(), Some(CollisionType::SelfCollision));
        assert_eq!(state.lives, 2);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_last_life_game_over() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.lives = 1;
        state.snake = Snake::new(Position::new(0, 120), Direction::Left, 3, 8);
        let body_before = state.snake.body.clone();

        let result = engine.tick(&mut state, None, 200);

        assert!(result.terminated);
        assert!(result.events.contains(&GameEvent::GameOver));
        assert_eq!(state.lives, 0);
        assert!(state.game_over);
        assert!(!state.game_won);
        assert_eq!(state.snake.body, body_before);
    }

    #[test]
    fn test_game_over_idle_is_unchanged() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.game_over = true;
        state.lives = 0;
        let before = state.clone();

        for now in [200, 5_000, 60_000] {
            let result = engine.tick(&mut state, None, now);
            assert!(result.terminated);
            assert!(result.events.is_empty());
        }

        assert_eq!(state, before);
    }

    #[test]
    fn test_game_over_any_input_resets() {
        let mut engine = engine();
        let mut state = fresh_state(&mut engine);
        state.game_over = true;
        state.lives = 0;
        state.score = 120;
        state.level = 3;
        state.move_speed_ms = 80;

        let result = engine.tick(&mut state, Some(Button::Back), 9_000);

        assert_eq!(result.events, vec![GameEvent::Reset]);
        assert!(!result.terminated);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.move_speed_ms, 200);
        assert_eq!(state.last_move_ms, 0);
        assert_eq!(state.snake, Snake::initial(engine.config()));
    }

    #[test]
    fn test_spawn_food_avoids_snake() {
        let mut engine = engine();
        let snake = Snake::initial(engine.config());

        for _ in 0..500 {
            let food = engine.spawn_food(&snake);
            assert!(food.active);
            assert!(!snake.body.contains(&food.position));
            assert_eq!(food.position.x % 8, 0);
            assert_eq!(food.position.y % 8, 0);
            assert!((0..320).contains(&food.position.x));
            assert!((0..240).contains(&food.position.y));
        }
    }

    #[test]
    fn test_spawn_food_falls_back_to_free_cell() {
        let config = GameConfig {
            screen_width: 32,
            screen_height: 8,
            spawn_attempts: 0,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 3);
        let snake = Snake::new(Position::new(16, 0), Direction::Right, 3, 8);

        let food = engine.spawn_food(&snake);

        assert_eq!(food.position, Position::new(24, 0));
    }

    #[test]
    fn test_spawn_food_on_full_board() {
        let config = GameConfig {
            screen_width: 32,
            screen_height: 8,
            ..Default::default()
        };
        let mut engine = GameEngine::with_seed(config, 3);
        let snake = Snake::new(Position::new(24, 0), Direction::Right, 4, 8);

        let food = engine.spawn_food(&snake);

        assert!(food.active);
        assert!(snake.body.contains(&food.position));
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = GameEngine::with_seed(GameConfig::default(), 42);
        let mut b = GameEngine::with_seed(GameConfig::default(), 42);
        assert_eq!(a.reset(), b.reset());
    }
}
