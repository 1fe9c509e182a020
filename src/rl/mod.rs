pub mod environment;
pub mod snake_env;
