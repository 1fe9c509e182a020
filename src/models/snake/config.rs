use std::{fs::File, io::BufReader, path::Path};

use log::info;
use serde::Deserialize;

use super::snake_game::{Result, SnakeError};

/// Default interior width, matching the classic gym environment.
pub const DEFAULT_WIDTH: usize = 40;
/// Default interior height.
pub const DEFAULT_HEIGHT: usize = 40;
/// Default starting length of the snake.
pub const DEFAULT_SNAKE_LENGTH: usize = 3;

/// Configuration for a [`crate::models::snake::snake_game::SnakeGame`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Interior rows of the board
    pub width: usize,
    /// Interior columns of the board
    pub height: usize,
    /// Starting length of the snake, head included
    pub snake_length: usize,
    /// Seed for food placement; entropy when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            snake_length: DEFAULT_SNAKE_LENGTH,
            seed: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new(width: usize, height: usize, snake_length: usize) -> Self {
        Self {
            width,
            height,
            snake_length,
            seed: None,
        }
    }

    /// Reads a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SnakeError::Io`] or [`SnakeError::Config`] if the file cannot
    /// be read or parsed, or the validation error of the parsed config.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        info!("Loading game config from {path:?}");
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// [`SnakeError::InvalidBoardSize`] for an empty board and
    /// [`SnakeError::InvalidSnakeLength`] if the snake would not fit in the
    /// grid to the left of its spawn point.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SnakeError::InvalidBoardSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.snake_length == 0 || self.snake_length - 1 > self.height / 2 {
            return Err(SnakeError::InvalidSnakeLength(self.snake_length));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_classic_env() {
        let config = GameConfig::default();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 40);
        assert_eq!(config.snake_length, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"width": 12, "seed": 9}"#).unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 40);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn longest_snake_that_fits() {
        assert!(GameConfig::new(4, 4, 3).validate().is_ok());
        assert!(GameConfig::new(4, 5, 4).validate().is_err());
        assert!(GameConfig::new(4, 6, 4).validate().is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::from_json_file(Path::new("/nonexistent/snake.json")).unwrap_err();
        assert!(matches!(err, SnakeError::Io(_)));
    }
}
