//! Closed-form Gambler's Ruin results — ruin probability and expected game
//! length for fair and biased games.
//!
//! All functions are pure: `(a, b, p_a)` in, scalar out. With `r = q / p`:
//!
//! ```text
//! P(ruin of A) = (r^a - r^(a+b)) / (1 - r^(a+b))          p != 1/2
//!              = b / (a + b)                               p == 1/2
//! E[L]         = (b - (a+b) * P(ruin of A)) / (p - q)      p != 1/2
//!              = a * b                                     p == 1/2
//! ```
//!
//! Powers are evaluated through `ln_1p` / `exp_m1` and reflected through
//! `1 / r` when `r > 1`, so no intermediate term overflows for large `a + b`
//! or extreme `p`.

use crate::domain::Capital;
use crate::error::{check_capitals, check_probability, RuinError};

/// Distance from 1/2 under which a game is treated as fair.
pub const FAIR_TOLERANCE: f64 = 1e-10;

/// `p_a` is close enough to 1/2 to use the fair-game formulas.
pub fn is_fair(p_a: f64) -> bool {
    (p_a - 0.5).abs() < FAIR_TOLERANCE
}

/// Probability that A is eventually ruined, starting from capitals `(a, b)`.
///
/// Finite and within `[0, 1]` for every valid input, including `p_a` of
/// exactly 0 or 1.
pub fn ruin_probability(a: Capital, b: Capital, p_a: f64) -> Result<f64, RuinError> {
    check_capitals(a, b)?;
    check_probability(p_a)?;

    let value = if is_fair(p_a) {
        b as f64 / (a as f64 + b as f64)
    } else {
        biased_ruin_probability(a as f64, b as f64, p_a)
    };

    if !value.is_finite() {
        return Err(RuinError::NumericOverflow { a, b, p_a });
    }
    Ok(value.clamp(0.0, 1.0))
}

/// Probability that A eventually ruins B.
pub fn win_probability(a: Capital, b: Capital, p_a: f64) -> Result<f64, RuinError> {
    Ok(1.0 - ruin_probability(a, b, p_a)?)
}

/// Expected number of rounds until one player is ruined.
///
/// Reduces continuously to `a * b` as `p_a → 1/2`.
pub fn expected_rounds(a: Capital, b: Capital, p_a: f64) -> Result<f64, RuinError> {
    check_capitals(a, b)?;
    check_probability(p_a)?;

    let (af, bf) = (a as f64, b as f64);
    if is_fair(p_a) {
        return Ok(af * bf);
    }

    let drift = p_a - (1.0 - p_a);
    let ruin = ruin_probability(a, b, p_a)?;
    let value = (bf - (af + bf) * ruin) / drift;

    if !value.is_finite() {
        return Err(RuinError::NumericOverflow { a, b, p_a });
    }
    Ok(value.max(0.0))
}

/// `(r^a - r^n) / (1 - r^n)` with `n = a + b`, evaluated without forming
/// `r^n` directly.
fn biased_ruin_probability(a: f64, b: f64, p: f64) -> f64 {
    let q = 1.0 - p;
    let n = a + b;
    if p > q {
        // r = q/p < 1: r^a * (1 - r^b) / (1 - r^n)
        let ln_r = ((q - p) / p).ln_1p();
        (a * ln_r).exp() * (b * ln_r).exp_m1() / (n * ln_r).exp_m1()
    } else {
        // s = p/q < 1: dividing through by r^n gives (1 - s^b) / (1 - s^n)
        let ln_s = ((p - q) / q).ln_1p();
        (b * ln_s).exp_m1() / (n * ln_s).exp_m1()
    }
}
