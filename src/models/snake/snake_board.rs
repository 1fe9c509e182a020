use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};

use super::{
    snake_game::{Coord, Grid, Result, SnakeError, EMPTY, FOOD, SNAKE, WALL},
    snake_player::SnakeAgent,
};

/// The playing field.
///
/// Two layers of identical shape, `(width + 2) x (height + 2)`: a static
/// layer with the wall border and the food marker, and an occupancy layer
/// counting snake segments per cell. Their cell-wise sum is the combined
/// state handed to callers.
#[derive(Clone, Debug)]
pub struct SnakeBoard {
    width: usize,
    height: usize,
    static_layer: Grid,
    occupancy: Grid,
    food: Option<Coord>,
}

impl SnakeBoard {
    /// Builds the walls, drops the first food on a random empty interior cell
    /// and draws `agent` into the occupancy layer.
    ///
    /// # Errors
    ///
    /// [`SnakeError::BoardFull`] if no interior cell is free for food and
    /// [`SnakeError::OutOfBounds`] if the agent lies outside the grid.
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        agent: &SnakeAgent,
        rng: &mut R,
    ) -> Result<Self> {
        let rows = width + 2;
        let cols = height + 2;
        let mut static_layer = vec![vec![EMPTY; cols]; rows];
        for (r, row) in static_layer.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                if r == 0 || c == 0 || r == rows - 1 || c == cols - 1 {
                    *cell = WALL;
                }
            }
        }
        let mut board = Self {
            width,
            height,
            static_layer,
            occupancy: vec![vec![EMPTY; cols]; rows],
            food: None,
        };
        board.spawn_food(None, rng)?;
        board.refresh_occupancy(agent)?;
        Ok(board)
    }

    /// Redraws the occupancy layer from the agent's head and body.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::OutOfBounds`] if a segment is outside the grid,
    /// leaving the previous layer in place.
    pub fn refresh_occupancy(&mut self, agent: &SnakeAgent) -> Result<()> {
        let mut occupancy = vec![vec![EMPTY; self.cols()]; self.rows()];
        for (row, col) in agent.segments() {
            let cell = occupancy
                .get_mut(row)
                .and_then(|r| r.get_mut(col))
                .ok_or(SnakeError::OutOfBounds { row, col })?;
            *cell += SNAKE;
        }
        self.occupancy = occupancy;
        Ok(())
    }

    /// Marks `at` as unoccupied regardless of how many segments were there.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::OutOfBounds`] if `at` is outside the grid.
    pub fn clear_occupancy(&mut self, at: Coord) -> Result<()> {
        let cell = self
            .occupancy
            .get_mut(at.0)
            .and_then(|r| r.get_mut(at.1))
            .ok_or(SnakeError::OutOfBounds { row: at.0, col: at.1 })?;
        *cell = EMPTY;
        Ok(())
    }

    /// Clears the current food and drops a new one on a random empty
    /// interior cell other than the one just cleared.
    ///
    /// Only the static layer is consulted, so food may land under the snake.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::BoardFull`] if there is no candidate cell. The
    /// board is then left without food.
    pub fn relocate_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Coord> {
        let previous = self.food.take();
        if let Some((row, col)) = previous {
            self.static_layer[row][col] = EMPTY;
        }
        let food = self.spawn_food(previous, rng)?;
        debug!("Food moved from {previous:?} to {food:?}");
        Ok(food)
    }

    /// Moves the food to `at`.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::OutOfBounds`] unless `at` is an interior cell.
    pub fn place_food(&mut self, at: Coord) -> Result<()> {
        if !self.is_interior(at) {
            return Err(SnakeError::OutOfBounds { row: at.0, col: at.1 });
        }
        if let Some((row, col)) = self.food.take() {
            self.static_layer[row][col] = EMPTY;
        }
        self.static_layer[at.0][at.1] = FOOD;
        self.food = Some(at);
        Ok(())
    }

    fn spawn_food<R: Rng + ?Sized>(&mut self, exclude: Option<Coord>, rng: &mut R) -> Result<Coord> {
        let mut available = Vec::new();
        for (r, row) in self.static_layer.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                if cell == EMPTY && Some((r, c)) != exclude {
                    available.push((r, c));
                }
            }
        }
        let Some(&(row, col)) = available.choose(rng) else {
            warn!("No where left to place food");
            return Err(SnakeError::BoardFull);
        };
        self.static_layer[row][col] = FOOD;
        self.food = Some((row, col));
        Ok((row, col))
    }

    /// Cell-wise sum of the static and occupancy layers.
    #[must_use]
    pub fn combined(&self) -> Grid {
        self.static_layer
            .iter()
            .zip(&self.occupancy)
            .map(|(s, o)| s.iter().zip(o).map(|(a, b)| a + b).collect())
            .collect()
    }

    /// Number of cells whose combined value equals `value`.
    #[must_use]
    pub fn count_combined(&self, value: u8) -> usize {
        self.static_layer
            .iter()
            .zip(&self.occupancy)
            .map(|(s, o)| s.iter().zip(o).filter(|(a, b)| *a + *b == value).count())
            .sum()
    }

    /// Number of cells holding exactly `value` segments.
    #[must_use]
    pub fn count_occupancy(&self, value: u8) -> usize {
        self.occupancy
            .iter()
            .map(|row| row.iter().filter(|&&v| v == value).count())
            .sum()
    }

    #[must_use]
    pub fn is_interior(&self, at: Coord) -> bool {
        (1..=self.width).contains(&at.0) && (1..=self.height).contains(&at.1)
    }

    #[must_use]
    pub fn static_layer(&self) -> &Grid {
        &self.static_layer
    }

    #[must_use]
    pub fn occupancy_layer(&self) -> &Grid {
        &self.occupancy
    }

    #[must_use]
    pub fn food(&self) -> Option<Coord> {
        self.food
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rows of the padded grid.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.width + 2
    }

    /// Columns of the padded grid.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.height + 2
    }
}
