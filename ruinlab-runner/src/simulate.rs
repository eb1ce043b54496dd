//! Flat call contracts over the engine, batch runner and formulas.
//!
//! Each function validates its arguments and takes an explicit randomness
//! source: a generator for single games, a seed for batches.

use rand::Rng;

use ruinlab_core::theory;
use ruinlab_core::{Capital, GameOutcome, GameParameters, GameRunner, RuinError};

use crate::batch::{BatchResult, BatchRunner};

/// One game to absorption or the round cap, without history.
pub fn simulate_game<R: Rng + ?Sized>(
    a: Capital,
    b: Capital,
    p_a: f64,
    max_rounds: u64,
    rng: &mut R,
) -> Result<GameOutcome, RuinError> {
    let params = GameParameters::new(a, b, p_a, max_rounds)?;
    Ok(GameRunner::new(params).run_to_absorption(rng))
}

/// One game with capital and cumulative-win histories.
pub fn simulate_game_with_history<R: Rng + ?Sized>(
    a: Capital,
    b: Capital,
    p_a: f64,
    max_rounds: u64,
    rng: &mut R,
) -> Result<GameOutcome, RuinError> {
    let params = GameParameters::new(a, b, p_a, max_rounds)?;
    Ok(GameRunner::new(params)
        .with_history(true)
        .run_to_absorption(rng))
}

/// `num_simulations` independent games with the default round cap.
pub fn simulate_batch(
    a: Capital,
    b: Capital,
    p_a: f64,
    num_simulations: usize,
    seed: u64,
) -> Result<BatchResult, RuinError> {
    let params = GameParameters::with_default_cap(a, b, p_a)?;
    BatchRunner::new(seed).run_batch(&params, num_simulations)
}

/// A's capital after `n` rounds (or at earlier ruin), once per game.
pub fn simulate_capital_at_horizon(
    a: Capital,
    b: Capital,
    p_a: f64,
    n: u64,
    num_simulations: usize,
    seed: u64,
) -> Result<Vec<Capital>, RuinError> {
    let params = GameParameters::with_default_cap(a, b, p_a)?;
    BatchRunner::new(seed).run_horizon_batch(&params, n, num_simulations)
}

pub fn theoretical_ruin_probability(a: Capital, b: Capital, p_a: f64) -> Result<f64, RuinError> {
    theory::ruin_probability(a, b, p_a)
}

pub fn theoretical_expected_rounds(a: Capital, b: Capital, p_a: f64) -> Result<f64, RuinError> {
    theory::expected_rounds(a, b, p_a)
}
