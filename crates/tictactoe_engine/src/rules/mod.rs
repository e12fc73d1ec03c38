//! Game rules for tic-tac-toe.
//!
//! Pure functions over [`Board`](crate::Board). Rules are kept apart from
//! board storage so the search code and the invariant checks share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, winning_marks};
