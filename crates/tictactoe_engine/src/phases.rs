//! Game phases and outcomes.

use crate::types::Mark;
use serde::{Deserialize, Serialize};

/// Where the engine is in its turn cycle.
///
/// ```text
/// AwaitingSymbolChoice -> AwaitingHumanMove <-> AwaitingOpponentMove -> Terminal
///                              ^                                            |
///                              +------------------ reset -------------------+
/// ```
///
/// `Aborted` is entered only when an invariant check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Phase {
    /// Session started; the human has not picked a mark yet.
    #[display("awaiting symbol choice")]
    AwaitingSymbolChoice,
    /// The human is to move.
    #[display("awaiting human move")]
    AwaitingHumanMove,
    /// The opponent is to move. Transient: the engine plays the reply before
    /// returning to the caller.
    #[display("awaiting opponent move")]
    AwaitingOpponentMove,
    /// Game over.
    #[display("game over ({_0})")]
    Terminal(Outcome),
    /// Game abandoned after an invariant violation.
    #[display("aborted")]
    Aborted,
}

impl Phase {
    /// True once the game has ended, normally or not.
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Terminal(_) | Phase::Aborted)
    }
}

/// Current status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// The terminal outcome, if the game is over.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won(mark) => Some(Outcome::Winner(mark)),
            GameStatus::Draw => Some(Outcome::Draw),
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A mark completed a line.
    Winner(Mark),
    /// Game ended in a draw.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }

    /// The result as seen by whoever holds `mark`.
    pub fn for_mark(&self, mark: Mark) -> GameOutcome {
        match self.winner() {
            None => GameOutcome::Draw,
            Some(winner) if winner == mark => GameOutcome::Win,
            Some(_) => GameOutcome::Loss,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "{mark} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Game outcome from the human's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum GameOutcome {
    /// Human won the game.
    Win,
    /// Human lost the game.
    Loss,
    /// Game ended in a draw.
    Draw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_perspective() {
        let x_wins = Outcome::Winner(Mark::X);
        assert_eq!(x_wins.for_mark(Mark::X), GameOutcome::Win);
        assert_eq!(x_wins.for_mark(Mark::O), GameOutcome::Loss);
        assert_eq!(Outcome::Draw.for_mark(Mark::O), GameOutcome::Draw);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::AwaitingHumanMove.to_string(), "awaiting human move");
        assert_eq!(
            Phase::Terminal(Outcome::Winner(Mark::O)).to_string(),
            "game over (O wins)"
        );
    }
}
