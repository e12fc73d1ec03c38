//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Mark, Square};

/// The eight winning lines: rows, then columns, then diagonals.
///
/// [`check_winner`] scans in this order, so when more than one line is
/// complete the first one listed here decides the result.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

fn line_owner(board: &Board, [a, b, c]: [Position; 3]) -> Option<Mark> {
    let sq = board.get(a.to_index())?;
    if sq != Square::Empty
        && Some(sq) == board.get(b.to_index())
        && Some(sq) == board.get(c.to_index())
    {
        sq.mark()
    } else {
        None
    }
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` for the owner of the first complete line,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Mark> {
    LINES.into_iter().find_map(|line| line_owner(board, line))
}

/// Every mark owning at least one complete line, X before O.
///
/// More than one entry means the board was never reachable by legal play.
pub fn winning_marks(board: &Board) -> Vec<Mark> {
    let owners: Vec<Mark> = LINES
        .into_iter()
        .filter_map(|line| line_owner(board, line))
        .collect();
    [Mark::X, Mark::O]
        .into_iter()
        .filter(|mark| owners.contains(mark))
        .collect()
}
