use crate::{
    models::snake::snake_game::{Grid, EMPTY, FOOD, FOOD_EATEN, WALL},
    view::View,
};

/// Draws the board as one line of characters per row.
///
/// Walls and snake segments both sum to 1 in the combined grid, so both draw
/// as `#`. Any stack above snake-on-food draws as a collision.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextView;

impl TextView {
    #[must_use]
    pub fn glyph(value: u8) -> char {
        match value {
            EMPTY => '.',
            // walls and snake segments share a value
            WALL => '#',
            FOOD => '*',
            FOOD_EATEN => '@',
            // collisions, stacked or on a wall
            _ => 'X',
        }
    }
}

impl View for TextView {
    fn draw(&self, grid: &Grid) -> String {
        let mut out = String::with_capacity(grid.iter().map(|r| r.len() + 1).sum());
        for row in grid {
            out.extend(row.iter().map(|&v| Self::glyph(v)));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_every_cell_value() {
        let grid = vec![vec![0, 1, 2], vec![3, 4, 5]];
        assert_eq!(TextView.draw(&grid), ".#X\n*@X\n");
    }
}
