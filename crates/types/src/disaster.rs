//! Disaster table attached to the population counter.
//!
//! These entries are configuration data only. No running session rolls
//! against them.

use serde::{Deserialize, Serialize};

/// A kind of disaster with its per-tick probability and death range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisasterType {
    pub name: String,
    /// Probability of occurring in a single tick (0.0 to 1.0)
    pub probability: f64,
    pub min_deaths: u64,
    pub max_deaths: u64,
}

impl DisasterType {
    pub fn new(name: impl Into<String>, probability: f64, min_deaths: u64, max_deaths: u64) -> Self {
        Self {
            name: name.into(),
            probability,
            min_deaths,
            max_deaths,
        }
    }

    /// The disaster table used by the world population counter
    pub fn world_defaults() -> Vec<DisasterType> {
        vec![
            DisasterType::new("Natural Disaster", 0.01, 1_000, 50_000),
            DisasterType::new("Conflict", 0.02, 500, 20_000),
            DisasterType::new("Disease Outbreak", 0.03, 200, 10_000),
            DisasterType::new("Industrial Accident", 0.01, 100, 5_000),
        ]
    }
}
