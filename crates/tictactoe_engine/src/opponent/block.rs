//! Medium tier: take a win, otherwise block, otherwise play at random.

use super::{Seats, Strategy, candidate_moves};
use crate::action::MoveError;
use crate::rng::GameRng;
use crate::types::{Board, Mark};
use tracing::debug;

/// Single-ply heuristic.
///
/// Scans empty squares in ascending order for a move that wins outright,
/// then for a square the human would win on next turn. Winning always takes
/// priority over blocking. With neither, falls back to a uniformly random
/// empty square.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockOrRandomStrategy;

/// First square where `mark` completes a line.
fn completing_square(board: &Board, moves: &[usize], mark: Mark) -> Option<usize> {
    moves.iter().copied().find(|&index| {
        board
            .with(index, mark)
            .is_ok_and(|next| next.winner() == Some(mark))
    })
}

impl Strategy for BlockOrRandomStrategy {
    fn choose(&self, board: &Board, seats: Seats, rng: &mut GameRng) -> Result<usize, MoveError> {
        let moves = candidate_moves(board)?;

        if let Some(index) = completing_square(board, &moves, seats.opponent) {
            debug!(index, "taking win");
            return Ok(index);
        }
        if let Some(index) = completing_square(board, &moves, seats.human) {
            debug!(index, "blocking");
            return Ok(index);
        }

        let index = rng.choose(&moves).ok_or_else(|| {
            MoveError::InvariantViolation("no candidate moves to choose from".to_string())
        })?;
        debug!(index, "no threats, random pick");
        Ok(index)
    }
}
