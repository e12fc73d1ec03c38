//! Moves, engine notifications, and move errors.
//!
//! Moves are domain events, not side effects. They are recorded in the
//! engine's history and handed back to the caller as [`GameEvent`]s.

use crate::phases::{Outcome, Phase};
use crate::stats::SessionStats;
use crate::types::Mark;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Who made a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Actor {
    /// The person at the keyboard.
    Human,
    /// The computer opponent.
    Opponent,
}

/// A mark placed at a board index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Board index (0-8).
    pub index: usize,
    /// The mark placed.
    pub mark: Mark,
    /// Who placed it.
    pub actor: Actor,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) -> {}", self.actor, self.mark, self.index)
    }
}

/// Notification from the engine to the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A move was applied to the board.
    MovePlaced(Move),
    /// The game reached a terminal state.
    GameOver {
        /// How the game ended.
        outcome: Outcome,
        /// Statistics after this game was counted.
        stats: SessionStats,
    },
}

/// Why a move or command was rejected. The game state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum IllegalMove {
    /// Index past the end of the board.
    #[display("Position {_0} is out of range (must be 0-8)")]
    OutOfRange(#[error(not(source))] usize),
    /// The square is already taken.
    #[display("Square {_0} is already occupied")]
    Occupied(#[error(not(source))] usize),
    /// The engine is not in a phase that accepts this call.
    #[display("Not allowed while {_0}")]
    WrongPhase(#[error(not(source))] Phase),
}

/// Error returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum MoveError {
    /// Recoverable: the caller asked for something the rules forbid.
    #[display("Illegal move: {_0}")]
    Illegal(IllegalMove),

    /// Fatal: the engine or its caller broke a game invariant.
    #[display("Invariant violation: {_0}")]
    #[from(skip)]
    InvariantViolation(#[error(not(source))] String),
}

impl MoveError {
    /// True for errors the caller can recover from by choosing again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MoveError::Illegal(_))
    }
}
