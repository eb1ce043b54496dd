//! Game engine — the Bernoulli stepping primitive and the loops that drive it.
//!
//! `RandomWalkEngine` moves one unit of capital per round and never looks at
//! termination. `GameRunner` owns the loop: it stops on ruin, on the round
//! cap, or at a fixed horizon, and optionally records the trajectory.

pub mod game_runner;
pub mod walk;

pub use game_runner::GameRunner;
pub use walk::RandomWalkEngine;
