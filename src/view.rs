use crate::models::snake::snake_game::Grid;

/// Turns a combined grid into something a human can look at.
pub trait View {
    fn draw(&self, grid: &Grid) -> String;
}
