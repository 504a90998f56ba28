//! Registry of counter descriptors
//!
//! The registry is an ordered, validated list of counters. It is owned by
//! whoever builds it and handed to a session; there is no global instance.

use std::collections::HashSet;

use thiserror::Error;
use tickboard_types::CounterDescriptor;

use crate::rng::{pick_index, RandomSource};
use crate::ticker::tick_period;

/// Reasons a set of descriptors is rejected
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("counter registry must contain at least one counter")]
    Empty,
    #[error("duplicate counter id: {0}")]
    DuplicateId(String),
    #[error("counter {id}: speed must be between 1ns and one year in seconds, got {speed}")]
    InvalidSpeed { id: String, speed: f64 },
    #[error("counter {id}: rate must be a non-negative number, got {rate}")]
    InvalidRate { id: String, rate: f64 },
}

/// Ordered list of counters with unique ids
#[derive(Debug, Clone)]
pub struct CounterRegistry {
    counters: Vec<CounterDescriptor>,
}

impl CounterRegistry {
    /// Build a registry, rejecting empty lists, duplicate ids and
    /// speeds that do not make a usable timer period, or negative rates.
    pub fn new(counters: Vec<CounterDescriptor>) -> Result<Self, RegistryError> {
        if counters.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::with_capacity(counters.len());
        for counter in &counters {
            if !seen.insert(counter.id.as_str()) {
                return Err(RegistryError::DuplicateId(counter.id.clone()));
            }
            if tick_period(counter.speed).is_none() {
                return Err(RegistryError::InvalidSpeed {
                    id: counter.id.clone(),
                    speed: counter.speed,
                });
            }
            if !counter.rate.is_finite() || counter.rate < 0.0 {
                return Err(RegistryError::InvalidRate {
                    id: counter.id.clone(),
                    rate: counter.rate,
                });
            }
        }

        Ok(Self { counters })
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Always false for a constructed registry
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CounterDescriptor> {
        self.counters.iter()
    }

    /// List all counter ids in registry order
    pub fn ids(&self) -> Vec<&str> {
        self.counters.iter().map(|c| c.id.as_str()).collect()
    }

    /// The first counter; a constructed registry is never empty
    pub fn first(&self) -> &CounterDescriptor {
        &self.counters[0]
    }

    pub fn get(&self, id: &str) -> Option<&CounterDescriptor> {
        self.counters.iter().find(|c| c.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.counters.iter().position(|c| c.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&CounterDescriptor> {
        self.counters.get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut CounterDescriptor> {
        self.counters.get_mut(index)
    }

    /// Look up `id`, falling back to the first counter when it is unknown
    pub fn resolve(&self, id: &str) -> (usize, &CounterDescriptor) {
        match self.position(id) {
            Some(index) => (index, &self.counters[index]),
            None => {
                log::warn!("Unknown counter '{}', falling back to '{}'", id, self.first().id);
                (0, self.first())
            }
        }
    }

    /// Index following `index`, wrapping around at the end
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.counters.len()
    }

    /// Id of a uniformly chosen counter
    pub fn pick_random_id<R: RandomSource + ?Sized>(&self, rng: &mut R) -> &str {
        &self.counters[pick_index(rng, self.counters.len())].id
    }
}
