//! Interactive terminal game.
//!
//! Line-based: the board is printed after every turn and the player types a
//! cell number, a position name, or a command.

use crate::config::PlayerConfig;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tictactoe_engine::{
    Actor, Difficulty, Engine, GameEvent, IllegalMove, Mark, MoveError, Outcome, Position,
    SessionStats,
};
use tracing::{info, instrument, warn};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Place a mark.
    Move(Position),
    /// Change the opponent tier.
    Difficulty(Difficulty),
    /// Change the player name.
    Name(String),
    /// Print the statistics line.
    Stats,
    /// Print the command summary.
    Help,
    /// Leave the game.
    Quit,
}

/// Parses one input line.
///
/// # Errors
///
/// A message suitable for showing to the player.
pub fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    match word.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Ok(Input::Quit),
        "s" | "stats" => Ok(Input::Stats),
        "h" | "help" | "?" => Ok(Input::Help),
        "d" | "difficulty" => rest
            .parse()
            .map(Input::Difficulty)
            .map_err(|_| format!("Unknown difficulty '{rest}' (easy, medium or hard)")),
        "n" | "name" => {
            if rest.is_empty() {
                Err("Usage: name <new name>".to_string())
            } else {
                Ok(Input::Name(rest.to_string()))
            }
        }
        _ => Position::parse_input(line)
            .map(Input::Move)
            .ok_or_else(|| format!("'{line}' is not a cell (1-9) or command; type 'help'")),
    }
}

const HELP: &str = "\
Enter a cell number 1-9 (or a name like 'center', 'top-left').
Commands: difficulty <easy|medium|hard>, name <new name>, stats, help, quit";

/// Settings for one interactive session.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Where name and difficulty changes are saved.
    pub config_path: PathBuf,
    /// Symbol chosen on the command line; asked for if `None`.
    pub symbol: Option<Mark>,
    /// Cosmetic pause before the computer's move is shown.
    pub delay: Duration,
}

/// Runs games until the player quits or input ends.
///
/// Returns the session statistics.
#[instrument(skip(engine, config, input, output))]
pub fn run<R: BufRead, W: Write>(
    engine: &mut Engine,
    config: &mut PlayerConfig,
    options: &PlayOptions,
    mut input: R,
    mut output: W,
) -> Result<SessionStats> {
    writeln!(output, "{}", config.player_name())?;
    writeln!(output, "{}", engine.stats())?;

    let symbol = match options.symbol {
        Some(mark) => mark,
        None => match ask_symbol(&mut input, &mut output)? {
            Some(mark) => mark,
            None => return Ok(*engine.stats()),
        },
    };
    engine.choose_symbol(symbol)?;
    writeln!(output, "You are {symbol}. {HELP}")?;

    loop {
        writeln!(output, "\n{}\n", engine.board())?;
        writeln!(output, "{}", engine.stats())?;
        writeln!(output, "{}'s Turn", config.player_name())?;
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = read_line(&mut input)? else {
            break;
        };
        let command = match parse_input(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{message}")?;
                continue;
            }
        };

        match command {
            Input::Quit => break,
            Input::Help => writeln!(output, "{HELP}")?,
            Input::Stats => writeln!(output, "{}", engine.stats())?,
            Input::Name(name) => {
                config.set_player_name(&name)?;
                config.save(&options.config_path)?;
                writeln!(output, "Name changed to {}", config.player_name())?;
            }
            Input::Difficulty(difficulty) => {
                engine.set_difficulty(difficulty);
                config.set_difficulty(difficulty);
                config.save(&options.config_path)?;
                if engine.pending_difficulty().is_some() {
                    writeln!(output, "Difficulty set to {difficulty} from the next game")?;
                } else {
                    writeln!(output, "Difficulty set to {difficulty}")?;
                }
            }
            Input::Move(position) => match engine.submit_human_move(position.to_index()) {
                Ok(events) => {
                    render_events(&events, engine.human_mark(), config, options.delay, &mut output)?;
                    if engine.phase().is_over() {
                        engine.reset_game()?;
                    }
                }
                Err(MoveError::Illegal(reason)) => {
                    warn!(%reason, "Rejected input move");
                    writeln!(output, "{}", describe_rejection(reason))?;
                }
                Err(fatal) => {
                    writeln!(output, "Internal error, starting a new game: {fatal}")?;
                    engine.reset_game()?;
                }
            },
        }
    }

    info!(stats = %engine.stats(), "Session ended");
    writeln!(output, "Final score: {}", engine.stats())?;
    Ok(*engine.stats())
}

/// Rejection text in the player's 1-based cell numbering.
fn describe_rejection(reason: IllegalMove) -> String {
    match reason {
        IllegalMove::Occupied(index) => format!("Cell {} is already taken", index + 1),
        other => other.to_string(),
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    Ok((read > 0).then_some(line))
}

fn ask_symbol<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<Mark>> {
    loop {
        write!(output, "Choose your symbol (X/O): ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.trim().parse::<Mark>() {
            Ok(mark) => return Ok(Some(mark)),
            Err(_) => writeln!(output, "Please type X or O")?,
        }
    }
}

fn render_events<W: Write>(
    events: &[GameEvent],
    human: Option<Mark>,
    config: &PlayerConfig,
    delay: Duration,
    output: &mut W,
) -> Result<()> {
    for event in events {
        match event {
            GameEvent::MovePlaced(mv) if mv.actor == Actor::Opponent => {
                writeln!(output, "CPU's Turn")?;
                output.flush()?;
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
                let cell = mv.index + 1;
                writeln!(output, "CPU plays {} at {cell}", mv.mark)?;
            }
            GameEvent::MovePlaced(_) => {}
            GameEvent::GameOver { outcome, stats } => {
                let banner = match (outcome, human) {
                    (Outcome::Draw, _) => "It's a Draw!".to_string(),
                    (Outcome::Winner(winner), Some(mark)) if *winner == mark => {
                        format!("{} Wins!", config.player_name())
                    }
                    (Outcome::Winner(_), _) => "CPU Wins!".to_string(),
                };
                writeln!(output, "\n{banner}\n{stats}")?;
            }
        }
    }
    Ok(())
}
