//! Simulation vs. closed-form theory.

use serde::Serialize;

use ruinlab_core::theory::{expected_rounds, ruin_probability};
use ruinlab_core::{GameParameters, RuinError};

use crate::batch::BatchResult;

/// Simulated vs. theoretical ruin probability for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuinComparison {
    pub params: GameParameters,
    pub simulated: f64,
    pub theoretical: f64,
    pub abs_error: f64,
    /// `abs_error / theoretical * 100`; 0 when the theoretical value is 0.
    pub relative_error_pct: f64,
}

/// Simulated vs. theoretical expected game length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationComparison {
    pub params: GameParameters,
    pub simulated_mean: f64,
    pub simulated_median: f64,
    pub simulated_std_dev: f64,
    pub theoretical: f64,
    pub abs_error: f64,
    pub relative_error_pct: f64,
    pub capped_games: usize,
}

pub fn compare_ruin(batch: &BatchResult) -> Result<RuinComparison, RuinError> {
    let p = &batch.params;
    let theoretical = ruin_probability(p.a(), p.b(), p.p_a())?;
    let abs_error = (batch.ruin_probability_a - theoretical).abs();
    Ok(RuinComparison {
        params: *p,
        simulated: batch.ruin_probability_a,
        theoretical,
        abs_error,
        relative_error_pct: relative_pct(abs_error, theoretical),
    })
}

pub fn compare_duration(batch: &BatchResult) -> Result<DurationComparison, RuinError> {
    let p = &batch.params;
    let theoretical = expected_rounds(p.a(), p.b(), p.p_a())?;
    let summary = batch.rounds_summary().ok_or_else(|| {
        RuinError::InvalidArgument("batch has no game samples".to_string())
    })?;
    let abs_error = (summary.mean - theoretical).abs();
    Ok(DurationComparison {
        params: *p,
        simulated_mean: summary.mean,
        simulated_median: summary.median,
        simulated_std_dev: summary.std_dev,
        theoretical,
        abs_error,
        relative_error_pct: relative_pct(abs_error, theoretical),
        capped_games: batch.capped_games,
    })
}

fn relative_pct(abs_error: f64, theoretical: f64) -> f64 {
    if theoretical == 0.0 {
        0.0
    } else {
        abs_error / theoretical.abs() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{BatchRunner, CappedPolicy, GameSample};
    use ruinlab_core::Termination;

    fn batch_of(p: GameParameters, samples: Vec<GameSample>) -> BatchResult {
        BatchResult::from_samples(p, CappedPolicy::CountAsSolvent, samples).unwrap()
    }

    #[test]
    fn ruin_errors_against_fair_share() {
        let p = GameParameters::new(5, 5, 0.5, 1_000).unwrap();
        let samples = vec![
            GameSample { a_won: false, rounds: 25, termination: Termination::RuinedA },
            GameSample { a_won: false, rounds: 25, termination: Termination::RuinedA },
            GameSample { a_won: false, rounds: 25, termination: Termination::RuinedA },
            GameSample { a_won: true, rounds: 25, termination: Termination::RuinedB },
        ];
        let c = compare_ruin(&batch_of(p, samples)).unwrap();
        assert!((c.simulated - 0.75).abs() < 1e-12);
        assert!((c.theoretical - 0.5).abs() < 1e-12);
        assert!((c.abs_error - 0.25).abs() < 1e-12);
        assert!((c.relative_error_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn zero_theory_gives_zero_relative_error() {
        let p = GameParameters::new(3, 3, 1.0, 1_000).unwrap();
        let samples = vec![GameSample { a_won: true, rounds: 3, termination: Termination::RuinedB }];
        let c = compare_ruin(&batch_of(p, samples)).unwrap();
        assert_eq!(c.theoretical, 0.0);
        assert_eq!(c.relative_error_pct, 0.0);
    }

    #[test]
    fn duration_comparison_uses_sample_summary() {
        let p = GameParameters::new(2, 2, 0.5, 1_000).unwrap();
        let samples = vec![
            GameSample { a_won: true, rounds: 2, termination: Termination::RuinedB },
            GameSample { a_won: false, rounds: 6, termination: Termination::RuinedA },
        ];
        let c = compare_duration(&batch_of(p, samples)).unwrap();
        assert!((c.simulated_mean - 4.0).abs() < 1e-12);
        assert!((c.simulated_median - 4.0).abs() < 1e-12);
        assert!((c.simulated_std_dev - 2.0).abs() < 1e-12);
        assert!((c.theoretical - 4.0).abs() < 1e-9);
        assert!(c.abs_error < 1e-9);
    }

    #[test]
    fn simulated_batch_is_close_to_theory() {
        let p = GameParameters::new(10, 10, 0.45, 100_000).unwrap();
        let batch = BatchRunner::new(42).run_batch(&p, 10_000).unwrap();
        let ruin = compare_ruin(&batch).unwrap();
        assert!(ruin.abs_error < 0.03, "{ruin:?}");
        let dur = compare_duration(&batch).unwrap();
        assert!(dur.relative_error_pct < 5.0, "{dur:?}");
    }
}
