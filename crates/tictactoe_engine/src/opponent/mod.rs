//! Computer opponent: one strategy per difficulty tier.
//!
//! [`Difficulty`] is a closed enum, and every tier is reached through the
//! single [`Strategy`] trait, so adding a tier is a compile error until
//! each `match` handles it.

mod block;
mod minimax;
mod random;

pub use block::BlockOrRandomStrategy;
pub use minimax::{MinimaxStrategy, evaluate};
pub use random::RandomStrategy;

use crate::action::MoveError;
use crate::rng::GameRng;
use crate::types::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Opponent difficulty tier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random moves.
    Easy,
    /// Take a win, else block a loss, else random.
    #[default]
    Medium,
    /// Full minimax search; never loses.
    Hard,
}

/// Which mark each side holds, from the opponent's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seats {
    /// The side the strategy plays against.
    pub human: Mark,
    /// The side the strategy plays for.
    pub opponent: Mark,
}

impl Seats {
    /// Seats for an opponent holding `opponent`; the human gets the other mark.
    pub fn for_opponent(opponent: Mark) -> Self {
        Self {
            human: opponent.opponent(),
            opponent,
        }
    }
}

/// Picks the opponent's next move.
pub trait Strategy {
    /// Returns an index from `board.available_indices()`.
    ///
    /// # Errors
    ///
    /// [`MoveError::InvariantViolation`] if the board has no empty square.
    fn choose(&self, board: &Board, seats: Seats, rng: &mut GameRng) -> Result<usize, MoveError>;
}

impl Strategy for Difficulty {
    #[instrument(skip(self, board, rng), fields(tier = %self))]
    fn choose(&self, board: &Board, seats: Seats, rng: &mut GameRng) -> Result<usize, MoveError> {
        match self {
            Difficulty::Easy => RandomStrategy.choose(board, seats, rng),
            Difficulty::Medium => BlockOrRandomStrategy.choose(board, seats, rng),
            Difficulty::Hard => MinimaxStrategy.choose(board, seats, rng),
        }
    }
}

/// Empty squares, or an invariant violation if there are none.
fn candidate_moves(board: &Board) -> Result<Vec<usize>, MoveError> {
    let moves = board.available_indices();
    if moves.is_empty() {
        return Err(MoveError::InvariantViolation(
            "opponent asked to move on a full board".to_string(),
        ));
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_difficulty_parses_lowercase() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_every_tier_rejects_full_board() {
        let mut board = Board::new();
        for (index, mark) in [
            Mark::X, Mark::O, Mark::X, Mark::X, Mark::O, Mark::O, Mark::O, Mark::X, Mark::X,
        ]
        .into_iter()
        .enumerate()
        {
            board.apply(index, mark).expect("empty square");
        }
        let mut rng = GameRng::new(3);
        for tier in Difficulty::iter() {
            let err = tier
                .choose(&board, Seats::for_opponent(Mark::O), &mut rng)
                .expect_err("full board");
            assert!(!err.is_recoverable(), "{tier} should report a fatal error");
        }
    }
}
