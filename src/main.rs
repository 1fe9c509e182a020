use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, info};

use gymsnake::{
    bots::snake::{random_bot::RandomBot, snake_bot::SnakeBot},
    models::snake::{config::GameConfig, snake_game::SnakeError},
    rl::{environment::Environment, snake_env::SnakeEnv},
};

#[derive(Parser, Debug)]
#[command(name = "gymsnake", version, about = "Play snake episodes with a random policy")]
struct Cli {
    /// JSON game config; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interior rows of the board
    #[arg(long)]
    width: Option<usize>,

    /// Interior columns of the board
    #[arg(long)]
    height: Option<usize>,

    /// Starting length of the snake
    #[arg(long)]
    snake_length: Option<usize>,

    /// Seed for food placement and the bot
    #[arg(long)]
    seed: Option<u64>,

    /// Number of episodes to play
    #[arg(long, default_value = "1")]
    episodes: usize,

    /// Step cap per episode
    #[arg(long, default_value = "500")]
    max_steps: usize,

    /// Print the board after every step
    #[arg(long)]
    render: bool,
}

fn build_config(cli: &Cli) -> Result<GameConfig, SnakeError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(snake_length) = cli.snake_length {
        config.snake_length = snake_length;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;
    Ok(config)
}

fn play_episode(
    env: &mut SnakeEnv,
    bot: &mut RandomBot,
    max_steps: usize,
    render: bool,
) -> Result<(f32, usize), SnakeError> {
    let mut state = env.reset()?;
    let mut total = 0.0;
    for step in 0..max_steps {
        let action = bot.make_move(&state.grid);
        let transition = env.step(&action)?;
        total += transition.reward;
        if render {
            println!("{}", env.render()?);
        }
        if transition.done {
            return Ok((total, step + 1));
        }
        state = transition.next_state;
    }
    Ok((total, max_steps))
}

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "gymsnake=info");
    }
    env_logger::init();
    debug!("Debug on");

    let cli = Cli::parse();
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            std::process::exit(2);
        }
    };
    // keep the policy stream apart from the food stream
    let mut bot = RandomBot::new(config.seed.map(|s| s.wrapping_add(1)));
    let mut env = SnakeEnv::from_config(config);

    for episode in 0..cli.episodes {
        match play_episode(&mut env, &mut bot, cli.max_steps, cli.render) {
            Ok((reward, steps)) => {
                info!("Episode {episode}: reward {reward} after {steps} steps");
            }
            Err(e) => {
                error!("Episode {episode} aborted: {e}");
            }
        }
    }
}
