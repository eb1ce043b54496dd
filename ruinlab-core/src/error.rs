//! Error taxonomy shared by the engine, the batch runner, and the formulas.

use thiserror::Error;

/// Errors reported to callers as explicit failure results.
///
/// Reaching the round cap is not an error: it is the `Capped` terminal state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuinError {
    /// An input outside the domain of the operation (non-positive capital,
    /// empty batch, probability outside `[0, 1]`, zero round cap).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A closed-form formula could not produce a finite, in-range `f64`.
    #[error("numeric overflow evaluating formula for a={a}, b={b}, p_a={p_a}")]
    NumericOverflow { a: i64, b: i64, p_a: f64 },
}

impl RuinError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Validate a single-round win probability: finite and within `[0, 1]`.
pub fn check_probability(p_a: f64) -> Result<(), RuinError> {
    if p_a.is_nan() || !(0.0..=1.0).contains(&p_a) {
        return Err(RuinError::invalid(format!(
            "p_a must lie in [0, 1], got {p_a}"
        )));
    }
    Ok(())
}

/// Validate a pair of starting capitals: both must be at least one unit.
pub fn check_capitals(a: i64, b: i64) -> Result<(), RuinError> {
    if a < 1 || b < 1 {
        return Err(RuinError::invalid(format!(
            "initial capitals must both be >= 1, got a={a}, b={b}"
        )));
    }
    if a.checked_add(b).is_none() {
        return Err(RuinError::invalid(format!(
            "total capital a+b overflows i64 (a={a}, b={b})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_bounds_are_inclusive() {
        assert!(check_probability(0.0).is_ok());
        assert!(check_probability(1.0).is_ok());
        assert!(check_probability(0.5).is_ok());
    }

    #[test]
    fn probability_outside_unit_interval_rejected() {
        assert!(matches!(
            check_probability(-0.01),
            Err(RuinError::InvalidArgument(_))
        ));
        assert!(check_probability(1.0001).is_err());
        assert!(check_probability(f64::NAN).is_err());
        assert!(check_probability(f64::INFINITY).is_err());
    }

    #[test]
    fn non_positive_capitals_rejected() {
        assert!(check_capitals(0, 5).is_err());
        assert!(check_capitals(5, 0).is_err());
        assert!(check_capitals(-3, 5).is_err());
        assert!(check_capitals(1, 1).is_ok());
    }

    #[test]
    fn overflowing_total_rejected() {
        assert!(check_capitals(i64::MAX, 1).is_err());
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = check_capitals(0, 5).unwrap_err();
        assert!(err.to_string().contains("a=0"));
        let err = RuinError::NumericOverflow { a: 1, b: 2, p_a: 0.3 };
        assert!(err.to_string().contains("p_a=0.3"));
    }
}
