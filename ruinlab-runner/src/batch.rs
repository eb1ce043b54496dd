//! Batch statistics — many independent games for one parameter set.
//!
//! Each game draws from its own generator, derived from the batch seed by the
//! core `RngHierarchy`. Results are therefore identical whether the batch runs
//! sequentially or across the rayon pool, and regardless of thread count.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ruinlab_core::{
    Capital, GameOutcome, GameParameters, GameRunner, RngHierarchy, RuinError, Stream,
    Termination,
};

use crate::distribution::{EmpiricalDistribution, SampleSummary};

/// Fraction of capped games above which a batch is flagged as biased.
pub const CAPPED_WARN_FRACTION: f64 = 0.01;

/// How games stopped by the round cap enter the ruin probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CappedPolicy {
    /// A capped game counts as a win for A when A is still solvent.
    #[default]
    CountAsSolvent,
    /// Capped games are left out of the ruin probability entirely.
    Exclude,
}

/// Per-game sample kept by a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSample {
    pub a_won: bool,
    pub rounds: u64,
    pub termination: Termination,
}

impl From<&GameOutcome> for GameSample {
    fn from(outcome: &GameOutcome) -> Self {
        Self {
            a_won: outcome.player_a_won,
            rounds: outcome.rounds_played,
            termination: outcome.termination,
        }
    }
}

/// Aggregate over one batch of independent games. Never mutated after
/// construction.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub params: GameParameters,
    pub num_simulations: usize,
    /// Probability that A is ruined, per `capped_policy`.
    pub ruin_probability_a: f64,
    /// Mean rounds played, capped games included at their capped length.
    pub average_rounds: f64,
    /// LMIN: shortest game observed.
    pub min_rounds: u64,
    /// LMAX: longest game observed.
    pub max_rounds_observed: u64,
    pub capped_games: usize,
    pub capped_policy: CappedPolicy,
    /// Raw per-game samples. Not serialized; use `rounds_distribution`.
    #[serde(skip_serializing)]
    pub samples: Vec<GameSample>,
}

impl BatchResult {
    /// Aggregate raw samples. Fails on an empty sample set, and under
    /// `CappedPolicy::Exclude` when no game was absorbed.
    pub fn from_samples(
        params: GameParameters,
        capped_policy: CappedPolicy,
        samples: Vec<GameSample>,
    ) -> Result<Self, RuinError> {
        let n = samples.len();
        if n == 0 {
            return Err(RuinError::InvalidArgument(
                "a batch needs at least one game".to_string(),
            ));
        }

        let capped_games = samples
            .iter()
            .filter(|s| s.termination == Termination::Capped)
            .count();

        let ruin_probability_a = match capped_policy {
            CappedPolicy::CountAsSolvent => {
                let wins = samples.iter().filter(|s| s.a_won).count();
                1.0 - wins as f64 / n as f64
            }
            CappedPolicy::Exclude => {
                let absorbed = n - capped_games;
                if absorbed == 0 {
                    return Err(RuinError::InvalidArgument(format!(
                        "all {n} games hit max_rounds={}; ruin probability is undefined when capped games are excluded",
                        params.max_rounds()
                    )));
                }
                let ruined = samples
                    .iter()
                    .filter(|s| s.termination == Termination::RuinedA)
                    .count();
                ruined as f64 / absorbed as f64
            }
        };

        let total_rounds: u64 = samples.iter().map(|s| s.rounds).sum();
        let min_rounds = samples.iter().map(|s| s.rounds).min().unwrap_or(0);
        let max_rounds_observed = samples.iter().map(|s| s.rounds).max().unwrap_or(0);

        Ok(Self {
            params,
            num_simulations: n,
            ruin_probability_a,
            average_rounds: total_rounds as f64 / n as f64,
            min_rounds,
            max_rounds_observed,
            capped_games,
            capped_policy,
            samples,
        })
    }

    /// Number of games A won (ruined B, or solvent at the cap).
    pub fn wins(&self) -> usize {
        self.samples.iter().filter(|s| s.a_won).count()
    }

    pub fn capped_fraction(&self) -> f64 {
        self.capped_games as f64 / self.num_simulations as f64
    }

    pub fn round_samples(&self) -> Vec<u64> {
        self.samples.iter().map(|s| s.rounds).collect()
    }

    /// Empirical distribution P(L) of game length.
    pub fn rounds_distribution(&self) -> EmpiricalDistribution<u64> {
        EmpiricalDistribution::from_samples(self.samples.iter().map(|s| s.rounds))
    }

    pub fn rounds_summary(&self) -> Option<SampleSummary> {
        let rounds: Vec<f64> = self.samples.iter().map(|s| s.rounds as f64).collect();
        SampleSummary::from_samples(&rounds)
    }
}

/// Runs batches of games with one seeded generator per game.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    hierarchy: RngHierarchy,
    parallel: bool,
    capped_policy: CappedPolicy,
}

impl BatchRunner {
    /// Creates a parallel runner with the default capped-game policy.
    pub fn new(seed: u64) -> Self {
        Self {
            hierarchy: RngHierarchy::new(seed),
            parallel: true,
            capped_policy: CappedPolicy::default(),
        }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_capped_policy(mut self, policy: CappedPolicy) -> Self {
        self.capped_policy = policy;
        self
    }

    pub fn seed(&self) -> u64 {
        self.hierarchy.master_seed()
    }

    pub fn capped_policy(&self) -> CappedPolicy {
        self.capped_policy
    }

    /// Play `num_simulations` independent games to absorption.
    pub fn run_batch(
        &self,
        params: &GameParameters,
        num_simulations: usize,
    ) -> Result<BatchResult, RuinError> {
        check_simulations(num_simulations)?;
        let started = Instant::now();
        debug!(
            a = params.a(),
            b = params.b(),
            p_a = params.p_a(),
            num_simulations,
            parallel = self.parallel,
            "batch started"
        );

        let runner = GameRunner::new(*params);
        let samples = self.collect(num_simulations, |i| {
            let mut rng = self.hierarchy.rng_for(params, Stream::Absorption, i);
            GameSample::from(&runner.run_to_absorption(&mut rng))
        });

        let result = BatchResult::from_samples(*params, self.capped_policy, samples)?;
        if result.capped_fraction() > CAPPED_WARN_FRACTION {
            warn!(
                capped = result.capped_games,
                num_simulations,
                max_rounds = params.max_rounds(),
                "games hit the round cap; ruin and duration statistics are biased"
            );
        }
        debug!(
            ruin_probability_a = result.ruin_probability_a,
            average_rounds = result.average_rounds,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch finished"
        );
        Ok(result)
    }

    /// A's capital after `horizon` rounds (or at early ruin), once per game.
    pub fn run_horizon_batch(
        &self,
        params: &GameParameters,
        horizon: u64,
        num_simulations: usize,
    ) -> Result<Vec<Capital>, RuinError> {
        check_simulations(num_simulations)?;
        debug!(horizon, num_simulations, "horizon batch started");

        let runner = GameRunner::new(*params);
        Ok(self.collect(num_simulations, |i| {
            let mut rng = self.hierarchy.rng_for(params, Stream::Horizon(horizon), i);
            runner.run_to_horizon(horizon, &mut rng)
        }))
    }

    /// Full games with capital and win-count histories.
    pub fn run_trajectories(
        &self,
        params: &GameParameters,
        games: usize,
    ) -> Result<Vec<GameOutcome>, RuinError> {
        check_simulations(games)?;
        let runner = GameRunner::new(*params).with_history(true);
        Ok(self.collect(games, |i| {
            let mut rng = self.hierarchy.rng_for(params, Stream::Trajectory, i);
            runner.run_to_absorption(&mut rng)
        }))
    }

    /// Evaluate `f` for iterations `0..n`, in iteration order.
    fn collect<T, F>(&self, n: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(u64) -> T + Send + Sync,
    {
        if self.parallel {
            (0..n).into_par_iter().map(|i| f(i as u64)).collect()
        } else {
            (0..n).map(|i| f(i as u64)).collect()
        }
    }
}

fn check_simulations(num_simulations: usize) -> Result<(), RuinError> {
    if num_simulations == 0 {
        return Err(RuinError::InvalidArgument(
            "num_simulations must be >= 1".to_string(),
        ));
    }
    Ok(())
}
