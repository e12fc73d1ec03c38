//! First-class invariants for a game in progress.
//!
//! Invariants are logical properties that must hold after every applied
//! move. The engine checks the full [`GameInvariants`] set and aborts the
//! game on any violation.

use crate::action::{Actor, Move};
use crate::types::{Board, Mark, Square};
use derive_new::new;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

/// Borrowed view of a game: the board and the moves that built it.
#[derive(Debug, Clone, Copy, new)]
pub struct GameView<'a> {
    /// Current board.
    pub board: &'a Board,
    /// Moves applied so far, oldest first.
    pub history: &'a [Move],
}

/// Invariant: the board holds exactly the moves in the history.
///
/// Every recorded move's square carries its mark, no square was played
/// twice, and the filled count equals the history length.
pub struct HistoryConsistentInvariant;

impl Invariant<GameView<'_>> for HistoryConsistentInvariant {
    fn holds(view: &GameView<'_>) -> bool {
        let mut seen = [false; 9];
        for mv in view.history {
            let Some(slot) = seen.get_mut(mv.index) else {
                return false;
            };
            if *slot || view.board.get(mv.index) != Some(Square::Occupied(mv.mark)) {
                return false;
            }
            *slot = true;
        }
        view.board.filled() == view.history.len()
    }

    fn description() -> &'static str {
        "Board matches move history"
    }
}

/// Invariant: human and opponent alternate, human first.
pub struct AlternatingTurnInvariant;

impl Invariant<GameView<'_>> for AlternatingTurnInvariant {
    fn holds(view: &GameView<'_>) -> bool {
        let actors_alternate = view.history.iter().enumerate().all(|(ply, mv)| {
            let expected = if ply % 2 == 0 {
                Actor::Human
            } else {
                Actor::Opponent
            };
            mv.actor == expected
        });
        let marks_alternate = view
            .history
            .windows(2)
            .all(|pair| pair[0].mark == pair[1].mark.opponent());
        actors_alternate && marks_alternate
    }

    fn description() -> &'static str {
        "Human and opponent alternate turns, human first"
    }
}

/// Invariant: mark counts never differ by more than one.
pub struct BalancedMarksInvariant;

impl Invariant<GameView<'_>> for BalancedMarksInvariant {
    fn holds(view: &GameView<'_>) -> bool {
        view.board.count(Mark::X).abs_diff(view.board.count(Mark::O)) <= 1
    }

    fn description() -> &'static str {
        "Mark counts differ by at most one"
    }
}

/// Invariant: at most one mark owns a winning line.
pub struct SingleWinnerInvariant;

impl Invariant<GameView<'_>> for SingleWinnerInvariant {
    fn holds(view: &GameView<'_>) -> bool {
        view.board.winners().len() <= 1
    }

    fn description() -> &'static str {
        "At most one mark owns a winning line"
    }
}

/// All game invariants as a composable set.
pub type GameInvariants = (
    HistoryConsistentInvariant,
    AlternatingTurnInvariant,
    BalancedMarksInvariant,
    SingleWinnerInvariant,
);

/// Checks [`GameInvariants`], joining any violations into one message.
pub fn check_game(view: &GameView<'_>) -> Result<(), String> {
    GameInvariants::check_all(view).map_err(|violations| {
        violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    })
}
