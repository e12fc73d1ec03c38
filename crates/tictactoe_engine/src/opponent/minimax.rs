//! Hard tier: exhaustive minimax search.
//!
//! At most nine plies remain from any position, so the search runs to the
//! end of the game with no depth limit. Each ply works on its own copy of
//! the board; nothing is mutated and undone.

use super::{Seats, Strategy, candidate_moves};
use crate::action::MoveError;
use crate::phases::GameStatus;
use crate::rng::GameRng;
use crate::types::{Board, Mark};
use std::collections::HashMap;
use tracing::debug;

/// Score of a leaf the opponent has won.
pub const WIN_SCORE: f64 = 1.0;
/// Score of a leaf the human has won.
pub const LOSS_SCORE: f64 = -1.0;
/// Score of a drawn leaf.
pub const DRAW_SCORE: f64 = 0.0;

/// Plays the first move (ascending index) with the best minimax score.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxStrategy;

type Memo = HashMap<(Board, Mark), f64>;

/// Minimax value of `board` with `to_move` about to play, scored for
/// `seats.opponent` as the maximizing side.
pub fn evaluate(board: &Board, to_move: Mark, seats: Seats) -> f64 {
    search(*board, to_move, seats, &mut Memo::new())
}

fn search(board: Board, to_move: Mark, seats: Seats, memo: &mut Memo) -> f64 {
    match board.status() {
        GameStatus::Won(mark) if mark == seats.opponent => return WIN_SCORE,
        GameStatus::Won(_) => return LOSS_SCORE,
        GameStatus::Draw => return DRAW_SCORE,
        GameStatus::InProgress => {}
    }
    if let Some(score) = memo.get(&(board, to_move)) {
        return *score;
    }

    let children = board
        .available_indices()
        .into_iter()
        .filter_map(|index| board.with(index, to_move).ok());
    let maximizing = to_move == seats.opponent;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for child in children {
        let score = search(child, to_move.opponent(), seats, memo);
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    memo.insert((board, to_move), best);
    best
}

impl Strategy for MinimaxStrategy {
    fn choose(&self, board: &Board, seats: Seats, _rng: &mut GameRng) -> Result<usize, MoveError> {
        let moves = candidate_moves(board)?;
        let mut memo = Memo::new();

        let mut best: Option<(usize, f64)> = None;
        for index in moves {
            let child = board.with(index, seats.opponent)?;
            let score = search(child, seats.human, seats, &mut memo);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        let (index, score) = best.ok_or_else(|| {
            MoveError::InvariantViolation("search found no move to play".to_string())
        })?;
        debug!(index, score, "minimax pick");
        Ok(index)
    }
}
