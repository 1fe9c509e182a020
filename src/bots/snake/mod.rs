pub mod random_bot;
pub mod snake_bot;
