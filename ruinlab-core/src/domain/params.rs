use serde::Serialize;

use crate::domain::Capital;
use crate::error::{check_capitals, check_probability, RuinError};

/// Round cap used when the caller does not supply one.
pub const DEFAULT_MAX_ROUNDS: u64 = 100_000;

/// Immutable configuration of one game: starting capitals, A's per-round win
/// probability, and the round cap.
///
/// Construction validates every field, so a `GameParameters` value in hand is
/// always a legal simulation input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameParameters {
    a: Capital,
    b: Capital,
    p_a: f64,
    max_rounds: u64,
}

impl GameParameters {
    pub fn new(a: Capital, b: Capital, p_a: f64, max_rounds: u64) -> Result<Self, RuinError> {
        check_capitals(a, b)?;
        check_probability(p_a)?;
        if max_rounds == 0 {
            return Err(RuinError::InvalidArgument(
                "max_rounds must be >= 1".to_string(),
            ));
        }
        Ok(Self {
            a,
            b,
            p_a,
            max_rounds,
        })
    }

    /// Parameters with the default round cap.
    pub fn with_default_cap(a: Capital, b: Capital, p_a: f64) -> Result<Self, RuinError> {
        Self::new(a, b, p_a, DEFAULT_MAX_ROUNDS)
    }

    /// Same game with a different round cap.
    pub fn with_max_rounds(self, max_rounds: u64) -> Result<Self, RuinError> {
        Self::new(self.a, self.b, self.p_a, max_rounds)
    }

    pub fn a(&self) -> Capital {
        self.a
    }

    pub fn b(&self) -> Capital {
        self.b
    }

    pub fn p_a(&self) -> f64 {
        self.p_a
    }

    /// Probability that B wins a single round.
    pub fn q(&self) -> f64 {
        1.0 - self.p_a
    }

    pub fn max_rounds(&self) -> u64 {
        self.max_rounds
    }

    /// Total capital in play; conserved by every round.
    pub fn total_capital(&self) -> Capital {
        self.a + self.b
    }
}
