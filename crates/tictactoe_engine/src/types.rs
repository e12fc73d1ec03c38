//! Core domain types for tic-tac-toe.

use crate::action::IllegalMove;
use crate::phases::GameStatus;
use crate::rules;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// One of the two symbols a player can hold.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Cross.
    X,
    /// Nought.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Nine bytes and `Copy`, so search code can take a fresh board per ply
/// instead of mutating and undoing a shared one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw squares.
    ///
    /// No game invariants are checked; use [`crate::invariants`] for that.
    pub fn from_squares(squares: [Square; CELLS]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Places `mark` at `index`.
    ///
    /// # Errors
    ///
    /// [`IllegalMove::OutOfRange`] past index 8, [`IllegalMove::Occupied`] if
    /// the square is taken. The board is untouched on error.
    #[instrument(level = "trace", skip(self))]
    pub fn apply(&mut self, index: usize, mark: Mark) -> Result<(), IllegalMove> {
        match self.squares.get_mut(index) {
            None => Err(IllegalMove::OutOfRange(index)),
            Some(Square::Occupied(_)) => Err(IllegalMove::Occupied(index)),
            Some(square) => {
                *square = Square::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    pub fn with(&self, index: usize, mark: Mark) -> Result<Self, IllegalMove> {
        let mut next = *self;
        next.apply(index, mark)?;
        Ok(next)
    }

    /// Empty square indices in ascending order.
    pub fn available_indices(&self) -> Vec<usize> {
        self.squares
            .iter()
            .enumerate()
            .filter(|(_, square)| **square == Square::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|square| **square == Square::Occupied(mark))
            .count()
    }

    /// Number of non-empty squares.
    pub fn filled(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Owner of the first winning line (rows, then columns, then diagonals).
    pub fn winner(&self) -> Option<Mark> {
        rules::check_winner(self)
    }

    /// Every mark that owns at least one winning line, X before O.
    pub fn winners(&self) -> Vec<Mark> {
        rules::winning_marks(self)
    }

    /// Classifies the board as in progress, won, or drawn.
    pub fn status(&self) -> GameStatus {
        if let Some(mark) = self.winner() {
            GameStatus::Won(mark)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; CELLS] {
        &self.squares
    }
}

impl std::fmt::Display for Board {
    /// Empty squares show their 1-based cell number.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.squares[index] {
                    Square::Empty => write!(f, "{}", index + 1)?,
                    Square::Occupied(mark) => write!(f, "{mark}")?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
