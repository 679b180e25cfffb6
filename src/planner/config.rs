use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::planner::constants::*;
use crate::units::UnitsConfig;

/// Configuration for the genetic planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub crossover_rate: f64,
    /// Validated and reported, but no operator applies it.
    pub mutation_rate: f64,
    /// Worker threads. `None` uses the available parallelism.
    pub workers: Option<usize>,
    /// Root seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub units: UnitsConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            max_generations: DEFAULT_MAX_GENERATIONS,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            workers: None,
            seed: None,
            units: UnitsConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: PlannerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(PlanError::InvalidConfig(
                "population_size must be at least 1".to_string(),
            ));
        }
        if self.max_generations == 0 {
            return Err(PlanError::InvalidConfig(
                "max_generations must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(PlanError::InvalidConfig(format!(
                "crossover_rate must be within [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(PlanError::InvalidConfig(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.workers == Some(0) {
            return Err(PlanError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.units.default_mass_unit.is_empty() || self.units.default_volume_unit.is_empty() {
            return Err(PlanError::InvalidConfig(
                "default units must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of worker threads the planner pool uses.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}
