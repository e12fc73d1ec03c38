//! Tests for board state and terminal evaluation.

use proptest::prelude::*;
use tictactoe_engine::{Board, GameStatus, IllegalMove, Mark, Position, Square, rules};

/// Plays `picks` as legal alternating moves from an empty board, X first,
/// stopping once the game is over. Each pick indexes into the empty squares.
fn reachable(picks: &[usize]) -> Board {
    let mut board = Board::new();
    let mut to_move = Mark::X;
    for pick in picks {
        if board.status() != GameStatus::InProgress {
            break;
        }
        let open = board.available_indices();
        board
            .apply(open[pick % open.len()], to_move)
            .expect("index taken from available squares");
        to_move = to_move.opponent();
    }
    board
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert_eq!(board.available_indices(), (0..9).collect::<Vec<_>>());
    assert_eq!(board.status(), GameStatus::InProgress);
    assert!(!board.is_full());
    assert_eq!(board.winner(), None);
}

#[test]
fn test_win_detected_immediately() {
    let mut board = Board::new();
    for index in [Position::TopRight, Position::Center] {
        board.apply(index.to_index(), Mark::O).expect("empty square");
    }
    assert_eq!(board.winner(), None);
    board
        .apply(Position::BottomLeft.to_index(), Mark::O)
        .expect("empty square");
    assert_eq!(board.winner(), Some(Mark::O));
    assert_eq!(board.status(), GameStatus::Won(Mark::O));
}

#[test]
fn test_full_board_with_win_is_not_draw() {
    // X X X / O O X / O X O: X completes the top row on the last move.
    let x = Square::Occupied(Mark::X);
    let o = Square::Occupied(Mark::O);
    let board = Board::from_squares([x, x, x, o, o, x, o, x, o]);
    assert!(board.is_full());
    assert_eq!(board.status(), GameStatus::Won(Mark::X));
    assert!(!rules::is_draw(&board));
}

proptest! {
    #[test]
    fn prop_occupied_apply_fails_and_preserves_board(
        picks in prop::collection::vec(0usize..9, 1..9),
        target in 0usize..9,
        mark_is_x in any::<bool>(),
    ) {
        let mut board = reachable(&picks);
        let mark = if mark_is_x { Mark::X } else { Mark::O };
        if !board.is_empty(target) {
            let before = board;
            prop_assert_eq!(board.apply(target, mark), Err(IllegalMove::Occupied(target)));
            prop_assert_eq!(board, before);
        }
    }

    #[test]
    fn prop_out_of_range_apply_fails(index in 9usize..1000) {
        let mut board = Board::new();
        prop_assert_eq!(board.apply(index, Mark::X), Err(IllegalMove::OutOfRange(index)));
        prop_assert_eq!(board, Board::new());
    }

    #[test]
    fn prop_winner_and_full_agree_with_status(picks in prop::collection::vec(0usize..9, 0..9)) {
        let board = reachable(&picks);
        match board.status() {
            GameStatus::Draw => {
                prop_assert!(board.is_full());
                prop_assert_eq!(board.winner(), None);
            }
            GameStatus::Won(mark) => prop_assert_eq!(board.winner(), Some(mark)),
            GameStatus::InProgress => {
                prop_assert!(!board.is_full());
                prop_assert_eq!(board.winner(), None);
            }
        }
        // Legal play never produces two winners.
        prop_assert!(board.winners().len() <= 1);
    }

    #[test]
    fn prop_available_indices_are_the_empty_squares(picks in prop::collection::vec(0usize..9, 0..9)) {
        let board = reachable(&picks);
        let open = board.available_indices();
        prop_assert!(open.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(open.len() + board.filled(), 9);
        prop_assert!(open.iter().all(|&i| board.is_empty(i)));
    }
}
