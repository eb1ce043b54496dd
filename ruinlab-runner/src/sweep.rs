//! Parameter sweeps: one batch per grid point, plus horizon and trajectory
//! studies over a single parameter set.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use ruinlab_core::{Capital, GameOutcome, GameParameters, RuinError, DEFAULT_MAX_ROUNDS};

use crate::batch::{BatchResult, BatchRunner};
use crate::comparison::{compare_duration, compare_ruin, DurationComparison, RuinComparison};
use crate::distribution::{capital_distribution, EmpiricalDistribution, SampleSummary};

/// Ordered list of parameter sets to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepGrid {
    points: Vec<GameParameters>,
}

impl SweepGrid {
    pub fn from_points(points: Vec<GameParameters>) -> Self {
        Self { points }
    }

    /// Fixed capitals, varying `p_a`. Every probability must be valid.
    pub fn probabilities(a: Capital, b: Capital, p_values: &[f64]) -> Result<Self, RuinError> {
        let points = p_values
            .iter()
            .map(|&p| GameParameters::with_default_cap(a, b, p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { points })
    }

    /// Fixed total capital, varying A's share. Splits that leave either
    /// player without capital are skipped.
    pub fn capital_split(total: Capital, a_values: &[Capital], p_a: f64) -> Result<Self, RuinError> {
        let mut points = Vec::with_capacity(a_values.len());
        for &a in a_values {
            // Skip invalid combinations (a outside 1..total)
            if a < 1 || a >= total {
                continue;
            }
            points.push(GameParameters::new(a, total - a, p_a, DEFAULT_MAX_ROUNDS)?);
        }
        Ok(Self { points })
    }

    /// Applies one round cap to every point.
    pub fn with_max_rounds(self, max_rounds: u64) -> Result<Self, RuinError> {
        let points = self
            .points
            .into_iter()
            .map(|p| p.with_max_rounds(max_rounds))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[GameParameters] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One grid point: the batch and both comparisons against theory.
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub batch: BatchResult,
    pub ruin: RuinComparison,
    pub duration: DurationComparison,
}

/// Distribution of A's capital after a fixed number of rounds.
#[derive(Debug, Clone, Serialize)]
pub struct HorizonPoint {
    pub horizon: u64,
    pub distribution: EmpiricalDistribution<Capital>,
    pub summary: SampleSummary,
}

/// Sweep executor.
///
/// Runs one batch per grid point, optionally in parallel across points.
/// Every point draws from generators keyed by its own parameters, so the
/// output does not depend on the execution order.
pub struct ParamSweep {
    runner: BatchRunner,
    num_simulations: usize,
    parallel: bool,
}

impl ParamSweep {
    pub fn new(runner: BatchRunner, num_simulations: usize) -> Self {
        Self {
            runner,
            num_simulations,
            parallel: true,
        }
    }

    /// Enables or disables parallel execution across grid points.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn runner(&self) -> &BatchRunner {
        &self.runner
    }

    /// Executes a sweep over the grid. Results come back in grid order.
    pub fn sweep(&self, grid: &SweepGrid) -> Result<Vec<SweepPoint>, RuinError> {
        let started = Instant::now();
        debug!(points = grid.len(), num_simulations = self.num_simulations, "sweep started");

        let points = if self.parallel {
            grid.points()
                .par_iter()
                .map(|params| self.point(params))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            grid.points()
                .iter()
                .map(|params| self.point(params))
                .collect::<Result<Vec<_>, _>>()?
        };

        debug!(
            points = points.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "sweep finished"
        );
        Ok(points)
    }

    /// Capital distribution at each horizon, one horizon batch per entry.
    pub fn horizons(
        &self,
        params: &GameParameters,
        horizons: &[u64],
    ) -> Result<Vec<HorizonPoint>, RuinError> {
        horizons
            .iter()
            .map(|&horizon| {
                let samples = self
                    .runner
                    .run_horizon_batch(params, horizon, self.num_simulations)?;
                horizon_point(horizon, &samples)
            })
            .collect()
    }

    /// Complete games with capital and win-count histories.
    pub fn trajectories(
        &self,
        params: &GameParameters,
        games: usize,
    ) -> Result<Vec<GameOutcome>, RuinError> {
        self.runner.run_trajectories(params, games)
    }

    fn point(&self, params: &GameParameters) -> Result<SweepPoint, RuinError> {
        let batch = self.runner.run_batch(params, self.num_simulations)?;
        let ruin = compare_ruin(&batch)?;
        let duration = compare_duration(&batch)?;
        Ok(SweepPoint {
            batch,
            ruin,
            duration,
        })
    }
}

pub(crate) fn horizon_point(horizon: u64, samples: &[Capital]) -> Result<HorizonPoint, RuinError> {
    let summary = SampleSummary::from_integers(samples).ok_or_else(|| {
        RuinError::InvalidArgument(format!("no capital samples at horizon {horizon}"))
    })?;
    Ok(HorizonPoint {
        horizon,
        distribution: capital_distribution(samples),
        summary,
    })
}
