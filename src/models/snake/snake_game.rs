use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use super::{config::GameConfig, snake_board::SnakeBoard, snake_player::SnakeAgent};

// Cell values. Walls and snake segments share the value 1 so that any
// overlap of the two layers sums to COLLISION.

/// Interior cell with nothing on it.
pub const EMPTY: u8 = 0;
/// Border cell of the static layer.
pub const WALL: u8 = 1;
/// One snake segment in the occupancy layer.
pub const SNAKE: u8 = 1;
/// Food marker in the static layer.
pub const FOOD: u8 = 3;
/// Combined value of a snake segment sitting on food.
pub const FOOD_EATEN: u8 = FOOD + SNAKE;
/// Combined value of a snake segment on a wall, or two segments on one cell.
pub const COLLISION: u8 = 2;

/// `(row, col)` into the padded grid.
pub type Coord = (usize, usize);
/// Row-major grid of cell values.
pub type Grid = Vec<Vec<u8>>;

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    InvalidBoardSize { width: usize, height: usize },
    #[error("snake of length {0} does not fit on the board")]
    InvalidSnakeLength(usize),
    #[error("action index {0} is outside the action space")]
    InvalidAction(usize),
    #[error("no empty cell left to place food")]
    BoardFull,
    #[error("environment has not been reset yet")]
    NotInitialized,
    #[error("game is already over")]
    GameOver,
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Action the [`SnakeAgent`] can take in the [`SnakeGame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnakeAction {
    Up,
    Down,
    Left,
    Right,
}

impl SnakeAction {
    /// Ordered by action index.
    pub const VARIANTS: &'static [SnakeAction] = &[Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector `(d_row, d_col)` of the move.
    #[must_use]
    pub fn value(self) -> (i8, i8) {
        match self {
            SnakeAction::Up => (-1, 0),
            SnakeAction::Down => (1, 0),
            SnakeAction::Left => (0, -1),
            SnakeAction::Right => (0, 1),
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            SnakeAction::Up => 0,
            SnakeAction::Down => 1,
            SnakeAction::Left => 2,
            SnakeAction::Right => 3,
        }
    }
}

impl TryFrom<usize> for SnakeAction {
    type Error = SnakeError;

    fn try_from(index: usize) -> Result<Self> {
        SnakeAction::VARIANTS
            .get(index)
            .copied()
            .ok_or(SnakeError::InvalidAction(index))
    }
}

/// Everything observable about one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Combined grid before the tick.
    pub state: Grid,
    pub action: SnakeAction,
    /// Combined grid after the tick.
    pub next_state: Grid,
    /// 1 for food, -1 for death, 0 otherwise. Death wins over food.
    pub reward: i8,
    pub food_eaten: bool,
    pub done: bool,
}

/// One game of snake: a [`SnakeBoard`] and the [`SnakeAgent`] moving on it.
#[derive(Debug)]
pub struct SnakeGame {
    board: SnakeBoard,
    agent: SnakeAgent,
    rng: StdRng,
    done: bool,
}

impl SnakeGame {
    /// Creates a new game with a snake of `snake_length` near the centre.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the board or snake dimensions are invalid.
    pub fn new(width: usize, height: usize, snake_length: usize) -> Result<Self> {
        Self::from_config(&GameConfig::new(width, height, snake_length))
    }

    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the config does not validate.
    pub fn from_config(config: &GameConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates a game drawing food placement from `rng`.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the config does not validate.
    pub fn with_rng(config: &GameConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let agent = SnakeAgent::new(
            (config.width / 2, config.height / 2),
            config.snake_length,
        );
        let board = SnakeBoard::new(config.width, config.height, &agent, &mut rng)?;
        if board.count_occupancy(COLLISION) > 0 || board.count_combined(COLLISION) > 0 {
            warn!("Snake spawned overlapping a wall or itself");
        }
        info!(
            "New {}x{} game with a snake of length {}",
            config.width, config.height, config.snake_length
        );
        Ok(Self {
            board,
            agent,
            rng,
            done: false,
        })
    }

    /// Runs one tick and reports the transition.
    ///
    /// # Errors
    ///
    /// [`SnakeError::GameOver`] if a previous tick was terminal and
    /// [`SnakeError::BoardFull`] if no cell is left for new food. In the latter
    /// case the tick has been applied and the game is over. A head pushed off
    /// the grid is reported as a fatal step, not an error.
    pub fn step(&mut self, action: SnakeAction) -> Result<StepOutcome> {
        if self.done {
            debug!("Tried to step a finished game");
            return Err(SnakeError::GameOver);
        }
        let state = self.board.combined();

        // A head spawned on the border of a one-cell-wide board can be pushed
        // off the grid; that is a wall hit like any other.
        match self.agent.advance(action) {
            Ok(()) => {}
            Err(SnakeError::OutOfBounds { row, col }) => {
                debug!("Snake left the board from ({row}, {col})");
                self.done = true;
                return Ok(StepOutcome {
                    next_state: state.clone(),
                    state,
                    action,
                    reward: -1,
                    food_eaten: false,
                    done: true,
                });
            }
            Err(e) => return Err(e),
        }
        self.board.refresh_occupancy(&self.agent)?;

        let food_eaten = self.board.count_combined(FOOD_EATEN) > 0;
        let mut reward = i8::from(food_eaten);

        // Free the oldest segment before the agent forgets it.
        if !food_eaten {
            if let Some(&oldest) = self.agent.body().front() {
                self.board.clear_occupancy(oldest)?;
            }
        }
        self.agent.trim(food_eaten);

        let relocated = if food_eaten {
            self.board.relocate_food(&mut self.rng).map(|_| ())
        } else {
            Ok(())
        };

        if self.board.count_combined(COLLISION) > 0 || self.board.count_occupancy(COLLISION) > 0 {
            debug!("Snake died at {:?}", self.agent.head());
            reward = -1;
            self.done = true;
        }

        if let Err(e) = relocated {
            warn!("Ending game: {e}");
            self.done = true;
            return Err(e);
        }

        Ok(StepOutcome {
            state,
            action,
            next_state: self.board.combined(),
            reward,
            food_eaten,
            done: self.done,
        })
    }

    /// Combined grid, static layer plus occupancy.
    #[must_use]
    pub fn get_current_state(&self) -> Grid {
        self.board.combined()
    }

    /// Moves the food to `at`, e.g. to stage a scenario.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if `at` is not an interior cell.
    pub fn place_food(&mut self, at: Coord) -> Result<()> {
        self.board.place_food(at)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.done
    }

    #[must_use]
    pub fn get_board(&self) -> &SnakeBoard {
        &self.board
    }

    #[must_use]
    pub fn get_agent(&self) -> &SnakeAgent {
        &self.agent
    }
}
