//! Command-line interface for the tictactoe binary.

use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::{Difficulty, Mark};

/// Tic-tac-toe against a computer opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Play tic-tac-toe against an easy, medium or hard computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the player config file (created if it doesn't exist)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Seed for the opponent's random choices
        #[arg(long)]
        seed: Option<u64>,

        /// Difficulty for this session (defaults to the configured one)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Your symbol; asked interactively if omitted
        #[arg(long)]
        symbol: Option<Mark>,

        /// Pause before the computer's move is shown, in milliseconds
        #[arg(long, default_value = "500")]
        delay_ms: u64,
    },

    /// Pit two difficulty tiers against each other
    Duel {
        /// Tier playing X (moves first)
        #[arg(long, default_value = "hard")]
        x: Difficulty,

        /// Tier playing O
        #[arg(long, default_value = "easy")]
        o: Difficulty,

        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Seed for reproducible series
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or edit the saved settings
    Config {
        /// Config action
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the current settings
    Show,

    /// Change the player name
    SetName {
        /// New name
        name: String,
    },

    /// Change the default difficulty
    SetDifficulty {
        /// easy, medium or hard
        difficulty: Difficulty,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_defaults() {
        let cli = Cli::try_parse_from(["tictactoe", "play"]).expect("valid args");
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        match cli.command {
            Command::Play {
                seed,
                difficulty,
                symbol,
                delay_ms,
            } => {
                assert_eq!(seed, None);
                assert_eq!(difficulty, None);
                assert_eq!(symbol, None);
                assert_eq!(delay_ms, 500);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_duel_parses_tiers() {
        let cli = Cli::try_parse_from([
            "tictactoe", "duel", "--x", "medium", "--o", "HARD", "-g", "10", "--json",
        ])
        .expect("valid args");
        match cli.command {
            Command::Duel { x, o, games, json, .. } => {
                assert_eq!(x, Difficulty::Medium);
                assert_eq!(o, Difficulty::Hard);
                assert_eq!(games, 10);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_tier() {
        assert!(Cli::try_parse_from(["tictactoe", "config", "set-difficulty", "brutal"]).is_err());
    }

    #[test]
    fn test_global_config_path() {
        let cli = Cli::try_parse_from(["tictactoe", "config", "show", "--config", "/tmp/t.toml"])
            .expect("valid args");
        assert_eq!(cli.config, PathBuf::from("/tmp/t.toml"));
    }
}
