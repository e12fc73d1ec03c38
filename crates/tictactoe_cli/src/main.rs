//! tictactoe - play against an easy, medium or hard computer opponent.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::time::Duration;
use tictactoe_cli::{Cli, Command, ConfigAction, PlayOptions, PlayerConfig, duel, play};
use tictactoe_engine::{Difficulty, Engine, Mark};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            seed,
            difficulty,
            symbol,
            delay_ms,
        } => run_play(&cli.config, seed, difficulty, symbol, delay_ms),
        Command::Duel {
            x,
            o,
            games,
            seed,
            json,
        } => duel::run(x, o, games, seed, json, std::io::stdout().lock()).map(|_| ()),
        Command::Config { action } => run_config(&cli.config, action),
    }
}

/// Run an interactive session
#[instrument]
fn run_play(
    config_path: &Path,
    seed: Option<u64>,
    difficulty: Option<Difficulty>,
    symbol: Option<Mark>,
    delay_ms: u64,
) -> Result<()> {
    let mut config = PlayerConfig::load_or_create(config_path)
        .with_context(|| format!("Loading {}", config_path.display()))?;
    let difficulty = difficulty.unwrap_or(*config.difficulty());

    let mut engine = match seed {
        Some(seed) => Engine::with_seed(difficulty, seed),
        None => Engine::new(difficulty),
    };
    let options = PlayOptions {
        config_path: config_path.to_path_buf(),
        symbol,
        delay: Duration::from_millis(delay_ms),
    };

    let stdin = std::io::stdin();
    let stats = play::run(
        &mut engine,
        &mut config,
        &options,
        stdin.lock(),
        std::io::stdout().lock(),
    )?;
    info!(%stats, "Goodbye");
    Ok(())
}

/// Show or edit the saved settings
#[instrument]
fn run_config(config_path: &Path, action: ConfigAction) -> Result<()> {
    let mut config = PlayerConfig::load_or_create(config_path)
        .with_context(|| format!("Loading {}", config_path.display()))?;

    match action {
        ConfigAction::Show => {}
        ConfigAction::SetName { name } => {
            config.set_player_name(&name)?;
            config.save(config_path)?;
        }
        ConfigAction::SetDifficulty { difficulty } => {
            config.set_difficulty(difficulty);
            config.save(config_path)?;
        }
    }

    println!("player_name = {}", config.player_name());
    println!("difficulty  = {}", config.difficulty());
    Ok(())
}
