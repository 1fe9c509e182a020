use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::models::snake::snake_game::{Grid, SnakeAction};

use super::snake_bot::SnakeBot;

/// Picks uniformly among the four actions, ignoring the board.
#[derive(Debug)]
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl SnakeBot for RandomBot {
    fn make_move(&mut self, _grid: &Grid) -> SnakeAction {
        SnakeAction::VARIANTS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(SnakeAction::Up)
    }
}
