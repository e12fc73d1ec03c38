//! Easy tier: uniformly random moves.

use super::{Seats, Strategy, candidate_moves};
use crate::action::MoveError;
use crate::rng::GameRng;
use crate::types::Board;
use tracing::debug;

/// Picks any empty square with equal probability. No look-ahead.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn choose(&self, board: &Board, _seats: Seats, rng: &mut GameRng) -> Result<usize, MoveError> {
        let moves = candidate_moves(board)?;
        let index = rng.choose(&moves).ok_or_else(|| {
            MoveError::InvariantViolation("no candidate moves to choose from".to_string())
        })?;
        debug!(index, "random pick");
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mark;

    #[test]
    fn test_only_empty_square_is_chosen() {
        let mut board = Board::new();
        for index in 0..8 {
            let mark = if index % 2 == 0 { Mark::X } else { Mark::O };
            board.apply(index, mark).expect("empty square");
        }
        let mut rng = GameRng::new(11);
        let seats = Seats::for_opponent(Mark::O);
        assert_eq!(RandomStrategy.choose(&board, seats, &mut rng), Ok(8));
    }

    #[test]
    fn test_spreads_over_all_squares() {
        let board = Board::new();
        let mut rng = GameRng::new(5);
        let seats = Seats::for_opponent(Mark::X);
        let mut seen = [false; 9];
        for _ in 0..500 {
            let index = RandomStrategy.choose(&board, seats, &mut rng).expect("empty board");
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
