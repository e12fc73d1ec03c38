//! Turn state machine for one human against the computer.
//!
//! The [`Engine`] owns the board, the move history, the RNG and the session
//! statistics. Front ends drive it through four calls
//! ([`choose_symbol`](Engine::choose_symbol),
//! [`submit_human_move`](Engine::submit_human_move),
//! [`set_difficulty`](Engine::set_difficulty),
//! [`reset_game`](Engine::reset_game)) and render the [`GameEvent`]s it
//! returns.

use crate::action::{Actor, GameEvent, IllegalMove, Move, MoveError};
use crate::invariants::{self, GameView};
use crate::opponent::{Difficulty, Seats, Strategy};
use crate::phases::{Outcome, Phase};
use crate::rng::GameRng;
use crate::stats::SessionStats;
use crate::types::{Board, Mark};
use tracing::{debug, error, info, instrument, warn};

/// A play session: successive games between a human and the computer.
#[derive(Debug, Clone)]
pub struct Engine {
    phase: Phase,
    board: Board,
    history: Vec<Move>,
    human: Option<Mark>,
    difficulty: Difficulty,
    pending_difficulty: Option<Difficulty>,
    stats: SessionStats,
    rng: GameRng,
}

impl Engine {
    /// Starts a session with an entropy-seeded opponent.
    #[instrument]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, GameRng::from_entropy())
    }

    /// Starts a session whose random choices are fixed by `seed`.
    #[instrument]
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, GameRng::new(seed))
    }

    /// Starts a session with the given random source.
    pub fn with_rng(difficulty: Difficulty, rng: GameRng) -> Self {
        info!(%difficulty, seed = rng.seed(), "New session");
        Self {
            phase: Phase::AwaitingSymbolChoice,
            board: Board::new(),
            history: Vec::new(),
            human: None,
            difficulty,
            pending_difficulty: None,
            stats: SessionStats::new(),
            rng,
        }
    }

    /// Fixes the human's mark for the session. The computer gets the other.
    ///
    /// # Errors
    ///
    /// [`IllegalMove::WrongPhase`] once a mark has already been chosen.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn choose_symbol(&mut self, mark: Mark) -> Result<(), MoveError> {
        if self.phase != Phase::AwaitingSymbolChoice {
            warn!("Symbol already chosen");
            return Err(IllegalMove::WrongPhase(self.phase).into());
        }
        self.human = Some(mark);
        self.phase = Phase::AwaitingHumanMove;
        info!(human = %mark, opponent = %mark.opponent(), "Symbol chosen");
        Ok(())
    }

    /// Selects the opponent tier.
    ///
    /// Takes effect at once if the current game has no moves yet, otherwise
    /// at the next [`reset_game`](Self::reset_game).
    #[instrument(skip(self), fields(current = %self.difficulty))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.history.is_empty() && !self.phase.is_over() {
            self.difficulty = difficulty;
            self.pending_difficulty = None;
            info!(%difficulty, "Difficulty changed");
        } else {
            self.pending_difficulty = Some(difficulty);
            info!(%difficulty, "Difficulty deferred to next game");
        }
    }

    /// Plays the human's move and, if the game goes on, the computer's reply.
    ///
    /// Returns the events in order: the human's [`GameEvent::MovePlaced`],
    /// then either a [`GameEvent::GameOver`] or the opponent's move
    /// (possibly followed by a `GameOver`).
    ///
    /// # Errors
    ///
    /// [`MoveError::Illegal`] for an out-of-range or occupied square, or when
    /// it is not the human's turn; nothing changes.
    /// [`MoveError::InvariantViolation`] if the game state is corrupt; the
    /// game is aborted.
    #[instrument(skip(self), fields(phase = %self.phase, difficulty = %self.difficulty))]
    pub fn submit_human_move(&mut self, index: usize) -> Result<Vec<GameEvent>, MoveError> {
        if self.phase != Phase::AwaitingHumanMove {
            warn!("Move rejected: not the human's turn");
            return Err(IllegalMove::WrongPhase(self.phase).into());
        }
        let Some(human) = self.human else {
            return Err(self.abort("human move accepted before a symbol was chosen".to_string()));
        };

        if let Err(e) = self.board.apply(index, human) {
            warn!(error = %e, "Move rejected");
            return Err(e.into());
        }

        let mut events = Vec::with_capacity(3);
        if self.commit(Move::new(index, human, Actor::Human), &mut events)? {
            return Ok(events);
        }

        self.phase = Phase::AwaitingOpponentMove;
        let seats = Seats::for_opponent(human.opponent());
        let reply = match self.difficulty.choose(&self.board, seats, &mut self.rng) {
            Ok(reply) => reply,
            Err(MoveError::InvariantViolation(reason)) => return Err(self.abort(reason)),
            Err(e) => return Err(self.abort(e.to_string())),
        };
        if let Err(e) = self.board.apply(reply, seats.opponent) {
            return Err(self.abort(format!("opponent chose an illegal square: {e}")));
        }
        debug!(index = reply, "Opponent replied");

        if !self.commit(Move::new(reply, seats.opponent, Actor::Opponent), &mut events)? {
            self.phase = Phase::AwaitingHumanMove;
        }
        Ok(events)
    }

    /// Clears the board for a new game with the same marks.
    ///
    /// Allowed after a game ends (or aborts), and mid-game while waiting for
    /// the human, which abandons the game without counting it. A deferred
    /// difficulty change takes effect here.
    ///
    /// # Errors
    ///
    /// [`IllegalMove::WrongPhase`] before a symbol has been chosen.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reset_game(&mut self) -> Result<(), MoveError> {
        match self.phase {
            Phase::AwaitingSymbolChoice | Phase::AwaitingOpponentMove => {
                warn!("Reset rejected");
                Err(IllegalMove::WrongPhase(self.phase).into())
            }
            Phase::AwaitingHumanMove | Phase::Terminal(_) | Phase::Aborted => {
                self.board = Board::new();
                self.history.clear();
                self.phase = Phase::AwaitingHumanMove;
                if let Some(difficulty) = self.pending_difficulty.take() {
                    self.difficulty = difficulty;
                }
                info!(difficulty = %self.difficulty, "Game reset");
                Ok(())
            }
        }
    }

    /// Records an applied move, checks invariants, and settles the game if
    /// it is over. Returns true when the game ended.
    fn commit(&mut self, mv: Move, events: &mut Vec<GameEvent>) -> Result<bool, MoveError> {
        self.history.push(mv);
        events.push(GameEvent::MovePlaced(mv));

        if let Err(violations) = invariants::check_game(&GameView::new(&self.board, &self.history)) {
            return Err(self.abort(violations));
        }

        match self.board.status().outcome() {
            Some(outcome) => {
                self.finish(outcome, events);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn finish(&mut self, outcome: Outcome, events: &mut Vec<GameEvent>) {
        self.phase = Phase::Terminal(outcome);
        if let Some(human) = self.human {
            self.stats.record(outcome.for_mark(human));
        }
        info!(%outcome, moves = self.history.len(), stats = %self.stats, "Game over");
        events.push(GameEvent::GameOver {
            outcome,
            stats: self.stats,
        });
    }

    fn abort(&mut self, reason: String) -> MoveError {
        error!(%reason, board = %self.board, "Invariant violated, aborting game");
        self.phase = Phase::Aborted;
        MoveError::InvariantViolation(reason)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves of the current game, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The human's mark, once chosen.
    pub fn human_mark(&self) -> Option<Mark> {
        self.human
    }

    /// The computer's mark, once the human has chosen.
    pub fn opponent_mark(&self) -> Option<Mark> {
        self.human.map(Mark::opponent)
    }

    /// Tier governing the current game.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Tier waiting for the next game, if one was set mid-game.
    pub fn pending_difficulty(&self) -> Option<Difficulty> {
        self.pending_difficulty
    }

    /// Session statistics.
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Empty square indices, ascending.
    pub fn available_indices(&self) -> Vec<usize> {
        self.board.available_indices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(difficulty: Difficulty, mark: Mark) -> Engine {
        let mut engine = Engine::with_seed(difficulty, 7);
        engine.choose_symbol(mark).expect("fresh session");
        engine
    }

    #[test]
    fn test_move_before_symbol_rejected() {
        let mut engine = Engine::with_seed(Difficulty::Easy, 1);
        let err = engine.submit_human_move(4).expect_err("no symbol yet");
        assert_eq!(
            err,
            MoveError::Illegal(IllegalMove::WrongPhase(Phase::AwaitingSymbolChoice))
        );
    }

    #[test]
    fn test_symbol_cannot_be_chosen_twice() {
        let mut engine = started(Difficulty::Easy, Mark::O);
        assert!(engine.choose_symbol(Mark::X).is_err());
        assert_eq!(engine.human_mark(), Some(Mark::O));
        assert_eq!(engine.opponent_mark(), Some(Mark::X));
    }

    #[test]
    fn test_human_move_triggers_reply() {
        let mut engine = started(Difficulty::Hard, Mark::X);
        let events = engine.submit_human_move(4).expect("legal move");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEvent::MovePlaced(Move::new(4, Mark::X, Actor::Human)));
        assert_eq!(events[1], GameEvent::MovePlaced(Move::new(0, Mark::O, Actor::Opponent)));
        assert_eq!(engine.phase(), Phase::AwaitingHumanMove);
        assert_eq!(engine.board().filled(), 2);
    }

    #[test]
    fn test_occupied_square_leaves_state_unchanged() {
        let mut engine = started(Difficulty::Hard, Mark::X);
        engine.submit_human_move(4).expect("legal move");
        let board = *engine.board();
        let history = engine.history().to_vec();

        let err = engine.submit_human_move(0).expect_err("opponent took 0");
        assert_eq!(err, MoveError::Illegal(IllegalMove::Occupied(0)));
        assert_eq!(*engine.board(), board);
        assert_eq!(engine.history(), history.as_slice());
        assert_eq!(engine.phase(), Phase::AwaitingHumanMove);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut engine = started(Difficulty::Easy, Mark::X);
        let err = engine.submit_human_move(9).expect_err("off the board");
        assert!(err.is_recoverable());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_difficulty_deferred_mid_game() {
        let mut engine = started(Difficulty::Easy, Mark::X);
        engine.set_difficulty(Difficulty::Medium);
        assert_eq!(engine.difficulty(), Difficulty::Medium);

        engine.submit_human_move(4).expect("legal move");
        engine.set_difficulty(Difficulty::Hard);
        assert_eq!(engine.difficulty(), Difficulty::Medium);
        assert_eq!(engine.pending_difficulty(), Some(Difficulty::Hard));

        engine.reset_game().expect("human to move");
        assert_eq!(engine.difficulty(), Difficulty::Hard);
        assert_eq!(engine.pending_difficulty(), None);
        assert!(engine.history().is_empty());
        assert_eq!(*engine.stats(), SessionStats::new());
    }

    #[test]
    fn test_corrupt_board_aborts_until_reset() {
        let mut engine = started(Difficulty::Hard, Mark::X);
        // An O the history never recorded.
        engine.board.apply(0, Mark::O).expect("empty square");

        let err = engine.submit_human_move(4).expect_err("board and history disagree");
        assert!(!err.is_recoverable());
        assert!(matches!(err, MoveError::InvariantViolation(_)));
        assert_eq!(engine.phase(), Phase::Aborted);
        assert_eq!(*engine.stats(), SessionStats::new());

        let err = engine.submit_human_move(8).expect_err("game aborted");
        assert_eq!(err, MoveError::Illegal(IllegalMove::WrongPhase(Phase::Aborted)));

        engine.reset_game().expect("aborted games can be reset");
        assert_eq!(engine.phase(), Phase::AwaitingHumanMove);
        assert_eq!(engine.board().filled(), 0);
        assert!(engine.history().is_empty());
        assert_eq!(*engine.stats(), SessionStats::new());
    }

    #[test]
    fn test_reset_before_symbol_rejected() {
        let mut engine = Engine::with_seed(Difficulty::Easy, 1);
        assert!(engine.reset_game().is_err());
    }
}
