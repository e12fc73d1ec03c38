//! Computer-vs-computer games between two difficulty tiers.
//!
//! X always moves first. Both sides draw from one shared RNG, so a seed
//! reproduces a whole series.

use crate::action::MoveError;
use crate::opponent::{Difficulty, Seats, Strategy};
use crate::phases::Outcome;
use crate::rng::GameRng;
use crate::types::{Board, Mark};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One finished duel game.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DuelGame {
    board: Board,
    moves: Vec<usize>,
    outcome: Outcome,
}

/// Plays one game of `x` against `o` to the end.
///
/// # Errors
///
/// Propagates a strategy's [`MoveError`]; with correct strategies this
/// does not happen.
#[instrument(skip(rng))]
pub fn play_duel(x: Difficulty, o: Difficulty, rng: &mut GameRng) -> Result<DuelGame, MoveError> {
    let mut board = Board::new();
    let mut moves = Vec::with_capacity(9);
    let mut to_move = Mark::X;

    loop {
        if let Some(outcome) = board.status().outcome() {
            debug!(%outcome, ?moves, "Duel finished");
            return Ok(DuelGame {
                board,
                moves,
                outcome,
            });
        }
        let tier = match to_move {
            Mark::X => x,
            Mark::O => o,
        };
        let index = tier.choose(&board, Seats::for_opponent(to_move), rng)?;
        board.apply(index, to_move)?;
        moves.push(index);
        to_move = to_move.opponent();
    }
}

/// Tally of a duel series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct DuelSummary {
    x: Difficulty,
    o: Difficulty,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
}

impl DuelSummary {
    /// Empty tally for `x` against `o`.
    pub fn new(x: Difficulty, o: Difficulty) -> Self {
        Self {
            x,
            o,
            ..Self::default()
        }
    }

    /// Counts one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Mark::X) => self.x_wins += 1,
            Outcome::Winner(Mark::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Games counted so far.
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Plays `games` duels and tallies them.
///
/// # Errors
///
/// Stops at the first game that fails.
#[instrument(skip(rng))]
pub fn run_series(
    x: Difficulty,
    o: Difficulty,
    games: u32,
    rng: &mut GameRng,
) -> Result<DuelSummary, MoveError> {
    let mut summary = DuelSummary::new(x, o);
    for _ in 0..games {
        summary.record(*play_duel(x, o, rng)?.outcome());
    }
    Ok(summary)
}
