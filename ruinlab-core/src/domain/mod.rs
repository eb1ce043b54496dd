//! Domain types for a single Gambler's Ruin game.

pub mod outcome;
pub mod params;
pub mod state;

pub use outcome::{GameOutcome, Termination};
pub use params::{GameParameters, DEFAULT_MAX_ROUNDS};
pub use state::{GameState, GameStatus};

/// Capital held by one player, in whole betting units.
pub type Capital = i64;
