use serde::{Deserialize, Serialize};

use crate::domain::{Capital, GameStatus};

/// Terminal state a finished game stopped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    RuinedA,
    RuinedB,
    Capped,
}

impl Termination {
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::RuinedA => Some(Termination::RuinedA),
            GameStatus::RuinedB => Some(Termination::RuinedB),
            GameStatus::Capped => Some(Termination::Capped),
        }
    }

    /// The game ended on a boundary rather than on the round cap.
    pub fn is_absorbed(self) -> bool {
        !matches!(self, Termination::Capped)
    }
}

/// Immutable result of one completed (or capped) game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// `capital_a > 0` when play stopped. For a capped game this reads
    /// "A wins if still solvent".
    pub player_a_won: bool,
    pub rounds_played: u64,
    pub termination: Termination,
    pub final_capital_a: Capital,
    /// A's capital before the first round and after every round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital_history: Option<Vec<Capital>>,
    /// A's cumulative round wins, aligned with `capital_history`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wins_history: Option<Vec<u64>>,
}

impl GameOutcome {
    pub fn was_capped(&self) -> bool {
        self.termination == Termination::Capped
    }

    /// Total rounds A won, when the win history was recorded.
    pub fn total_wins(&self) -> Option<u64> {
        self.wins_history.as_ref().and_then(|w| w.last().copied())
    }
}
