//! Serializable study configuration.
//!
//! A study is one parameter set, one batch, and optional horizon samples,
//! loaded from TOML:
//!
//! ```toml
//! horizons = [1, 10, 50]
//!
//! [game]
//! a = 50
//! b = 50
//! p_a = 0.5
//!
//! [batch]
//! num_simulations = 10000
//! seed = 42
//! capped_policy = "count_as_solvent"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use ruinlab_core::{Capital, GameParameters, RuinError, DEFAULT_MAX_ROUNDS};

use crate::batch::{BatchResult, BatchRunner, CappedPolicy};
use crate::comparison::{compare_duration, compare_ruin, DurationComparison, RuinComparison};
use crate::sweep::{HorizonPoint, ParamSweep};

/// Content hash identifying a study configuration.
pub type StudyId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Invalid(#[from] RuinError),
}

/// Game parameters as written in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSection {
    pub a: Capital,
    pub b: Capital,
    pub p_a: f64,
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u64,
}

/// Batch execution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSection {
    pub num_simulations: usize,
    pub seed: u64,
    pub parallel: bool,
    pub capped_policy: CappedPolicy,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            num_simulations: 10_000,
            seed: 42,
            parallel: true,
            capped_policy: CappedPolicy::default(),
        }
    }
}

/// Complete, reproducible description of one study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Round counts at which A's capital is sampled.
    #[serde(default)]
    pub horizons: Vec<u64>,

    pub game: GameSection,

    #[serde(default)]
    pub batch: BatchSection,
}

fn default_max_rounds() -> u64 {
    DEFAULT_MAX_ROUNDS
}

impl StudyConfig {
    /// Load a study from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a study from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deterministic hash of the configuration. Identical studies share an
    /// id and reproduce identical results.
    pub fn study_id(&self) -> Result<StudyId, ConfigError> {
        let canonical = toml::to_string(self)?;
        Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
    }

    pub fn params(&self) -> Result<GameParameters, RuinError> {
        GameParameters::new(self.game.a, self.game.b, self.game.p_a, self.game.max_rounds)
    }

    pub fn runner(&self) -> BatchRunner {
        BatchRunner::new(self.batch.seed)
            .with_parallelism(self.batch.parallel)
            .with_capped_policy(self.batch.capped_policy)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.params()?;
        if self.batch.num_simulations == 0 {
            return Err(RuinError::InvalidArgument(
                "batch.num_simulations must be >= 1".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Execute the batch, the horizon batches and the theory comparison.
    pub fn run(&self) -> Result<StudyReport, ConfigError> {
        self.validate()?;
        let study_id = self.study_id()?;
        let params = self.params()?;
        debug!(%study_id, horizons = self.horizons.len(), "study started");

        let runner = self.runner();
        let batch = runner.run_batch(&params, self.batch.num_simulations)?;
        let ruin = compare_ruin(&batch)?;
        let duration = compare_duration(&batch)?;
        let horizons = ParamSweep::new(runner, self.batch.num_simulations)
            .horizons(&params, &self.horizons)?;

        Ok(StudyReport {
            study_id,
            params,
            batch,
            ruin,
            duration,
            horizons,
        })
    }
}

/// Everything a study produced.
#[derive(Debug, Clone, Serialize)]
pub struct StudyReport {
    pub study_id: StudyId,
    pub params: GameParameters,
    pub batch: BatchResult,
    pub ruin: RuinComparison,
    pub duration: DurationComparison,
    pub horizons: Vec<HorizonPoint>,
}

impl StudyReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
