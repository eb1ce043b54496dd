//! RuinLab Core — game state, random walk, game runner, closed-form theory.
//!
//! This crate contains the heart of the Gambler's Ruin engine:
//! - Domain types (parameters, state, outcome) and the game state machine
//! - Single-round Bernoulli step with conserved total capital
//! - Game runner: play to absorption under a round cap, or to a fixed horizon
//! - Closed-form ruin probability and expected duration
//! - Deterministic per-game RNG derivation for reproducible, parallel batches

pub mod domain;
pub mod engine;
pub mod error;
pub mod rng;
pub mod theory;

pub use domain::{
    Capital, GameOutcome, GameParameters, GameState, GameStatus, Termination, DEFAULT_MAX_ROUNDS,
};
pub use engine::{GameRunner, RandomWalkEngine};
pub use error::RuinError;
pub use rng::{RngHierarchy, Stream};
