//! Counter templates: descriptors whose value is described by a seed.
//!
//! The built-in catalogue and user config both describe counters this way;
//! a template becomes a [`CounterDescriptor`] once its seed is resolved.

use serde::{Deserialize, Serialize};
use tickboard_types::{CounterDescriptor, DisasterType, ValueSeed};

use crate::rng::RandomSource;
use crate::seed::{resolve_seed, SeedContext};

fn default_rate() -> f64 {
    1.0
}

fn default_speed() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// A counter definition with a seeded starting value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterTemplate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub seed: ValueSeed,
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Seconds between ticks
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_true")]
    pub is_positive: bool,
    /// Rule for regenerating the value whenever the counter is switched to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseed: Option<ValueSeed>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disasters: Vec<DisasterType>,
}

impl CounterTemplate {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        seed: ValueSeed,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            seed,
            rate: default_rate(),
            speed: default_speed(),
            is_positive: true,
            reseed: None,
            disasters: Vec::new(),
        }
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn reseed(mut self, seed: ValueSeed) -> Self {
        self.reseed = Some(seed);
        self
    }

    pub fn disasters(mut self, disasters: Vec<DisasterType>) -> Self {
        self.disasters = disasters;
        self
    }

    /// Resolve the seed and produce a concrete descriptor
    pub fn instantiate<R: RandomSource + ?Sized>(&self, rng: &mut R, ctx: &SeedContext) -> CounterDescriptor {
        CounterDescriptor {
            id: self.id.clone(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            value: resolve_seed(&self.seed, rng, ctx),
            rate: self.rate,
            speed: self.speed,
            is_positive: self.is_positive,
            reseed: self.reseed.clone(),
            disasters: self.disasters.clone(),
        }
    }
}
