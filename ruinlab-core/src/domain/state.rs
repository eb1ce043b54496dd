use serde::{Deserialize, Serialize};

use crate::domain::{Capital, GameParameters};

/// Where a game stands in its lifecycle.
///
/// `InProgress` is the only non-terminal status; no transition leaves a
/// terminal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    /// A's capital reached zero.
    RuinedA,
    /// B's capital reached zero.
    RuinedB,
    /// The round cap was reached with both players still solvent.
    Capped,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Mutable state of one game. Owned exclusively by the game being played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub capital_a: Capital,
    pub capital_b: Capital,
    pub round: u64,
}

impl GameState {
    /// Fresh state at round 0.
    pub fn new(params: &GameParameters) -> Self {
        Self {
            capital_a: params.a(),
            capital_b: params.b(),
            round: 0,
        }
    }

    pub fn total_capital(&self) -> Capital {
        self.capital_a + self.capital_b
    }

    /// Either player has hit zero.
    pub fn is_absorbed(&self) -> bool {
        self.capital_a <= 0 || self.capital_b <= 0
    }

    /// Classify the state against a round cap. Ruin takes precedence over the
    /// cap when both happen on the same round.
    pub fn status(&self, max_rounds: u64) -> GameStatus {
        if self.capital_a <= 0 {
            GameStatus::RuinedA
        } else if self.capital_b <= 0 {
            GameStatus::RuinedB
        } else if self.round >= max_rounds {
            GameStatus::Capped
        } else {
            GameStatus::InProgress
        }
    }
}
