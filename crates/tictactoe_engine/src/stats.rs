//! Win/loss/draw counters for a play session.

use crate::phases::GameOutcome;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Aggregated results from the human's perspective.
///
/// Owned by the [`Engine`](crate::Engine) and bumped exactly once per
/// completed game. Counters only go up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Getters)]
pub struct SessionStats {
    wins: u32,
    losses: u32,
    draws: u32,
}

impl SessionStats {
    /// Creates new, all-zero statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one finished game.
    #[instrument(skip(self))]
    pub fn record(&mut self, outcome: GameOutcome) {
        let counter = match outcome {
            GameOutcome::Win => &mut self.wins,
            GameOutcome::Loss => &mut self.losses,
            GameOutcome::Draw => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
    }

    /// Number of finished games.
    pub fn total_games(&self) -> u32 {
        self.wins.saturating_add(self.losses).saturating_add(self.draws)
    }

    /// Calculates win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        match self.total_games() {
            0 => 0.0,
            total => f64::from(self.wins) / f64::from(total) * 100.0,
        }
    }
}

impl std::fmt::Display for SessionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wins: {}  Losses: {}  Draws: {}",
            self.wins, self.losses, self.draws
        )
    }
}
