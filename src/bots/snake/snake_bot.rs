use crate::models::snake::snake_game::{Grid, SnakeAction};

pub trait SnakeBot {
    /// Picks the next action from the combined grid.
    fn make_move(&mut self, grid: &Grid) -> SnakeAction;
}
