//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::Species;
use serde::{Deserialize, Serialize};

/// Initial population densities, one per species.
///
/// Each value is the probability that a given cell is seeded with that
/// species when the simulation is (re)populated. The values are walked
/// cumulatively against a single uniform draw per cell, so their sum must
/// not exceed 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Probability that a cell starts with a rabbit
    pub rabbits: f64,
    /// Probability that a cell starts with a fox
    pub foxes: f64,
    /// Probability that a cell starts with a coyote
    pub coyotes: f64,
}

impl PopulationConfig {
    pub fn density(&self, species: Species) -> f64 {
        match species {
            Species::Rabbit => self.rabbits,
            Species::Fox => self.foxes,
            Species::Coyote => self.coyotes,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            rabbits: 0.08,
            foxes: 0.02,
            coyotes: 0.01,
        }
    }
}

/// Simulation run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Width of the field (number of columns)
    pub width: u32,
    /// Depth of the field (number of rows)
    pub depth: u32,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Initial population densities
    pub population: PopulationConfig,
}

impl SimulationConfig {
    /// Check the configuration before the field is ever built. Invalid
    /// values are rejected here, not at step time.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.depth == 0 {
            return Err(Error::InvalidConfig(format!(
                "field dimensions must be non-zero, got {}x{}",
                self.depth, self.width
            )));
        }
        let densities = [
            ("rabbits", self.population.rabbits),
            ("foxes", self.population.foxes),
            ("coyotes", self.population.coyotes),
        ];
        for (name, density) in densities {
            if !(0.0..=1.0).contains(&density) {
                return Err(Error::InvalidConfig(format!(
                    "{name} density must be in [0, 1], got {density}"
                )));
            }
        }
        let total: f64 = densities.iter().map(|(_, d)| d).sum();
        if total > 1.0 {
            return Err(Error::InvalidConfig(format!(
                "population densities sum to {total}, which exceeds 1"
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 120,
            depth: 80,
            seed: 1111,
            population: PopulationConfig::default(),
        }
    }
}
