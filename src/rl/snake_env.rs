use log::{debug, info};

use crate::{
    models::snake::{
        config::GameConfig,
        snake_game::{Grid, Result, SnakeAction, SnakeError, SnakeGame},
    },
    rl::environment::{Environment, Transition},
    view::View,
    views::text_view::TextView,
};

/// Number of discrete actions.
pub const ACTION_SPACE_SIZE: usize = 4;
/// Render modes understood by [`SnakeEnv::render`].
pub const RENDER_MODES: &[&str] = &["human"];

/// Combined grid handed to learners.
#[derive(Clone, Debug, PartialEq)]
pub struct GridState {
    pub grid: Grid,
}

impl From<Grid> for GridState {
    fn from(grid: Grid) -> Self {
        Self { grid }
    }
}

impl From<GridState> for Vec<f32> {
    fn from(state: GridState) -> Self {
        state
            .grid
            .into_iter()
            .flatten()
            .map(f32::from)
            .collect()
    }
}

/// Gym-style wrapper around [`SnakeGame`].
///
/// Nothing is playable until [`Environment::reset`] (or
/// [`SnakeEnv::reset_with_size`]) has been called.
#[derive(Debug)]
pub struct SnakeEnv {
    config: GameConfig,
    game: Option<SnakeGame>,
    last_state: Option<GridState>,
    view: TextView,
}

impl SnakeEnv {
    #[must_use]
    pub fn new(width: usize, height: usize, snake_length: usize) -> Self {
        Self::from_config(GameConfig::new(width, height, snake_length))
    }

    #[must_use]
    pub fn from_config(config: GameConfig) -> Self {
        Self {
            config,
            game: None,
            last_state: None,
            view: TextView,
        }
    }

    /// Starts a fresh game on a board of the given size.
    ///
    /// # Errors
    ///
    /// Returns a [`SnakeError`] if the new dimensions are invalid. The previous
    /// game, if any, is kept in that case.
    pub fn reset_with_size(&mut self, width: usize, height: usize) -> Result<GridState> {
        let config = GameConfig {
            width,
            height,
            ..self.config.clone()
        };
        let game = SnakeGame::from_config(&config)?;
        self.config = config;
        let state = GridState::from(game.get_current_state());
        self.game = Some(game);
        self.last_state = Some(state.clone());
        info!("Environment reset to {width}x{height}");
        Ok(state)
    }

    /// Steps with a raw action index, 0 to 3 for up, down, left and right.
    ///
    /// # Errors
    ///
    /// [`SnakeError::InvalidAction`] for an index outside the action space,
    /// otherwise as [`Environment::step`].
    pub fn step_index(&mut self, index: usize) -> Result<Transition<GridState, SnakeAction>> {
        let action = SnakeAction::try_from(index)?;
        self.step(&action)
    }

    #[must_use]
    pub fn last_state(&self) -> Option<&GridState> {
        self.last_state.as_ref()
    }

    #[must_use]
    pub fn game(&self) -> Option<&SnakeGame> {
        self.game.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl Default for SnakeEnv {
    fn default() -> Self {
        Self::from_config(GameConfig::default())
    }
}

impl Environment for SnakeEnv {
    type State = GridState;
    type Action = SnakeAction;
    type Error = SnakeError;

    fn reset(&mut self) -> Result<GridState> {
        debug!("Reseting state");
        self.reset_with_size(self.config.width, self.config.height)
    }

    fn step(&mut self, action: &SnakeAction) -> Result<Transition<GridState, SnakeAction>> {
        let game = self.game.as_mut().ok_or(SnakeError::NotInitialized)?;
        let outcome = game.step(*action)?;
        let state = GridState::from(outcome.state);
        let next_state = GridState::from(outcome.next_state);
        self.last_state = Some(next_state.clone());
        Ok(Transition {
            state,
            action: outcome.action,
            next_state,
            reward: f32::from(outcome.reward),
            done: outcome.done,
        })
    }

    fn render(&self) -> Result<String> {
        let game = self.game.as_ref().ok_or(SnakeError::NotInitialized)?;
        Ok(self.view.draw(&game.get_current_state()))
    }

    fn get_action_mask(&self) -> Vec<bool> {
        // all actions are always valid
        vec![true; ACTION_SPACE_SIZE]
    }

    fn all_actions() -> Vec<SnakeAction> {
        SnakeAction::VARIANTS.to_vec()
    }

    fn action_to_index(action: &SnakeAction) -> usize {
        action.index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> SnakeEnv {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut config = GameConfig::new(6, 6, 3);
        config.seed = Some(5);
        SnakeEnv::from_config(config)
    }

    #[test]
    fn nothing_works_before_reset() {
        let mut env = env();
        assert!(matches!(env.render(), Err(SnakeError::NotInitialized)));
        assert!(matches!(
            env.step(&SnakeAction::Up),
            Err(SnakeError::NotInitialized)
        ));
        assert!(env.last_state().is_none());
    }

    #[test]
    fn reset_returns_the_current_grid() {
        let mut env = env();
        let state = env.reset().unwrap();
        assert_eq!(state.grid.len(), 8);
        assert_eq!(Some(&state), env.last_state());
        let flat: Vec<f32> = state.into();
        assert_eq!(flat.len(), 64);
        assert_eq!(flat[0], 1.0);
    }

    #[test]
    fn reset_with_size_changes_the_board() {
        let mut env = env();
        let state = env.reset_with_size(10, 4).unwrap();
        assert_eq!(state.grid.len(), 12);
        assert_eq!(state.grid[0].len(), 6);
        assert_eq!(env.config().width, 10);
        assert!(env.reset_with_size(0, 4).is_err());
        assert_eq!(env.config().width, 10);
    }

    #[test]
    fn step_chains_states() {
        let mut env = env();
        let start = env.reset().unwrap();
        let t = env.step(&SnakeAction::Down).unwrap();
        assert_eq!(t.state, start);
        assert_eq!(t.action, SnakeAction::Down);
        assert_eq!(Some(&t.next_state), env.last_state());
        assert!(t.reward >= 0.0);
    }

    #[test]
    fn step_index_validates() {
        let mut env = env();
        env.reset().unwrap();
        assert!(matches!(env.step_index(4), Err(SnakeError::InvalidAction(4))));
        let t = env.step_index(1).unwrap();
        assert_eq!(t.action, SnakeAction::Down);
    }

    #[test]
    fn render_draws_walls() {
        let mut env = env();
        env.reset().unwrap();
        let picture = env.render().unwrap();
        let lines: Vec<&str> = picture.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "########");
    }

    #[test]
    fn action_space_shape() {
        assert_eq!(SnakeEnv::all_actions().len(), ACTION_SPACE_SIZE);
        assert_eq!(SnakeEnv::action_to_index(&SnakeAction::Left), 2);
        assert_eq!(RENDER_MODES, &["human"]);
        assert_eq!(env().get_action_mask(), vec![true; 4]);
    }
}
