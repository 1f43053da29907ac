use super::{
    action::Direction,
    config::{ConfigError, GameConfig},
    state::{Outcome, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;

/// Reasons a hand-built simulation state is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("the snake needs at least one segment")]
    EmptySnake,
    #[error("segment {0} lies outside the grid")]
    SegmentOutOfBounds(Position),
    #[error("segment {0} appears more than once")]
    OverlappingSegments(Position),
    #[error("food at {0} lies outside the grid")]
    FoodOutOfBounds(Position),
    #[error("food at {0} sits on the snake")]
    FoodOnSnake(Position),
    #[error("heading {0:?} runs straight into the neck")]
    ReversedIntoNeck(Direction),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

/// The grid simulation: one snake, one food cell, a fixed board
///
/// Crashes are not errors. [`GridSimulation::step`] reports them as an
/// [`Outcome`] and has already reset the board by the time it returns.
#[derive(Debug, Clone)]
pub struct GridSimulation {
    config: GameConfig,
    grid_width: i32,
    grid_height: i32,
    snake: Snake,
    food: Position,
    rng: StdRng,
}

impl GridSimulation {
    /// Create a simulation in its initial configuration. Fails if the
    /// config does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as [`GridSimulation::new`] but with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let too_large = || ConfigError::GridTooLarge {
            grid_width: config.grid_width(),
            grid_height: config.grid_height(),
        };
        let grid_width = i32::try_from(config.grid_width()).map_err(|_| too_large())?;
        let grid_height = i32::try_from(config.grid_height()).map_err(|_| too_large())?;

        let mut sim = Self {
            snake: Snake::new(Position::default(), Direction::Up, 1),
            food: Position::default(),
            config,
            grid_width,
            grid_height,
            rng,
        };
        sim.reset();
        Ok(sim)
    }

    /// Build a simulation from an arbitrary mid-game state
    pub fn from_parts(
        config: GameConfig,
        segments: Vec<Position>,
        direction: Direction,
        food: Position,
    ) -> Result<Self, SimulationError> {
        Self::from_parts_with_rng(config, segments, direction, food, StdRng::from_entropy())
    }

    /// [`GridSimulation::from_parts`] with a seeded RNG
    pub fn from_parts_seeded(
        config: GameConfig,
        segments: Vec<Position>,
        direction: Direction,
        food: Position,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        Self::from_parts_with_rng(
            config,
            segments,
            direction,
            food,
            StdRng::seed_from_u64(seed),
        )
    }

    fn from_parts_with_rng(
        config: GameConfig,
        segments: Vec<Position>,
        direction: Direction,
        food: Position,
        rng: StdRng,
    ) -> Result<Self, SimulationError> {
        let mut sim = Self::with_rng(config, rng)?;

        if segments.is_empty() {
            return Err(SimulationError::EmptySnake);
        }
        for (i, &segment) in segments.iter().enumerate() {
            if !sim.is_in_bounds(segment) {
                return Err(SimulationError::SegmentOutOfBounds(segment));
            }
            if segments[..i].contains(&segment) {
                return Err(SimulationError::OverlappingSegments(segment));
            }
        }
        if !sim.is_in_bounds(food) {
            return Err(SimulationError::FoodOutOfBounds(food));
        }
        if segments.contains(&food) {
            return Err(SimulationError::FoodOnSnake(food));
        }
        if segments.get(1) == Some(&segments[0].moved_in_direction(direction)) {
            return Err(SimulationError::ReversedIntoNeck(direction));
        }

        sim.snake = Snake::from_segments(segments, direction);
        sim.food = food;
        Ok(sim)
    }

    /// Put the snake back in the centre of the board, heading up, and
    /// place fresh food.
    pub fn reset(&mut self) {
        let center = Position::new(self.grid_width / 2, self.grid_height / 2);

        // Built heading up, so the body trails downwards from the centre.
        self.snake = Snake::new(center, Direction::Up, self.config.initial_snake_length);
        self.respawn_food();
    }

    /// Request a new heading. A request for the exact reverse of the current
    /// heading is ignored. Returns whether the request was taken.
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if self.snake.direction.is_opposite(requested) {
            return false;
        }
        self.snake.direction = requested;
        true
    }

    /// Advance the snake by one cell
    ///
    /// Checks run in a fixed order: wall, then food, then body. A tick that
    /// eats never checks the body.
    pub fn step(&mut self) -> Outcome {
        let new_head = self.snake.head().moved_in_direction(self.snake.direction);

        if !self.is_in_bounds(new_head) {
            self.reset();
            return Outcome::HitWall;
        }

        if new_head == self.food {
            self.snake.advance(new_head, true);
            self.respawn_food();
            return Outcome::Ate;
        }

        self.snake.advance(new_head, false);

        if self.snake.collides_with_body(new_head) {
            self.reset();
            return Outcome::HitSelf;
        }

        Outcome::Moved
    }

    /// Move the food to a random free cell
    ///
    /// Samples until it hits a cell the snake does not occupy. There is no
    /// guard for a board the snake fills completely: that loop would never
    /// end. Validated configs start with free cells, and the snake can only
    /// fill the board by eating its way there.
    pub fn respawn_food(&mut self) {
        loop {
            let x = self.rng.gen_range(0..self.grid_width);
            let y = self.rng.gen_range(0..self.grid_height);
            let pos = Position::new(x, y);

            if !self.snake.occupies(pos) {
                self.food = pos;
                return;
            }
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.grid_width && pos.y >= 0 && pos.y < self.grid_height
    }

    /// Snake segments, head first
    pub fn segments(&self) -> &[Position] {
        self.snake.segments()
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width as usize
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height as usize
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
