//! Tic-tac-toe engine with a three-tier computer opponent.
//!
//! # Architecture
//!
//! - **Board**: nine squares, move application, win/draw evaluation
//! - **Engine**: turn state machine for a human against the computer,
//!   owning the session statistics
//! - **Opponent**: `Easy` (random), `Medium` (win, else block, else random)
//!   and `Hard` (full minimax) behind one [`Strategy`] trait
//! - **Invariants**: checked after every move; a violation aborts the game
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Difficulty, Engine, GameEvent, Mark};
//!
//! let mut engine = Engine::with_seed(Difficulty::Hard, 42);
//! engine.choose_symbol(Mark::X)?;
//! let events = engine.submit_human_move(4)?;
//! assert!(matches!(events[0], GameEvent::MovePlaced(_)));
//! # Ok::<(), tictactoe_engine::MoveError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod duel;
mod engine;
pub mod invariants;
mod opponent;
mod phases;
mod position;
mod rng;
pub mod rules;
mod stats;
mod types;

pub use action::{Actor, GameEvent, IllegalMove, Move, MoveError};
pub use duel::{DuelGame, DuelSummary, play_duel, run_series};
pub use engine::Engine;
pub use opponent::{
    BlockOrRandomStrategy, Difficulty, MinimaxStrategy, RandomStrategy, Seats, Strategy, evaluate,
};
pub use phases::{GameOutcome, GameStatus, Outcome, Phase};
pub use position::Position;
pub use rng::GameRng;
pub use stats::SessionStats;
pub use types::{Board, CELLS, Mark, Square};
