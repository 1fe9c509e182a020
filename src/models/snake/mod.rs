//! Snake simulation: board, agent and the game that ties them together.

pub mod config;
pub mod snake_board;
pub mod snake_game;
pub mod snake_player;
