//! RuinLab Runner — batch statistics, distributions, theory comparison, sweeps.
//!
//! This crate builds on `ruinlab-core` to provide:
//! - Batches of independent games, sequential or across the rayon pool
//! - Empirical distributions of game length and of capital at a horizon
//! - Simulation vs. closed-form theory comparison
//! - Parameter sweeps over `p_a` and capital splits
//! - TOML study configuration
//! - Flat call contracts (`simulate_*`, `theoretical_*`)

pub mod batch;
pub mod comparison;
pub mod config;
pub mod distribution;
pub mod simulate;
pub mod sweep;

pub use batch::{BatchResult, BatchRunner, CappedPolicy, GameSample, CAPPED_WARN_FRACTION};
pub use comparison::{compare_duration, compare_ruin, DurationComparison, RuinComparison};
pub use config::{BatchSection, ConfigError, GameSection, StudyConfig, StudyId, StudyReport};
pub use distribution::{capital_distribution, percentile, EmpiricalDistribution, SampleSummary};
pub use simulate::{
    simulate_batch, simulate_capital_at_horizon, simulate_game, simulate_game_with_history,
    theoretical_expected_rounds, theoretical_ruin_probability,
};
pub use sweep::{HorizonPoint, ParamSweep, SweepGrid, SweepPoint};
