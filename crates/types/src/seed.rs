//! Value seeds: rules that produce a counter's starting value.

use serde::{Deserialize, Serialize};

fn default_base_digits() -> u32 {
    8
}

fn default_min_multiplier() -> u64 {
    1
}

fn default_max_multiplier() -> u64 {
    1000
}

/// Parameters for a "large" random number: `base * multiplier` where
/// `base` is drawn from `[0, 10^base_digits)` and `multiplier` from
/// `[min_multiplier, max_multiplier]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeNumberSpec {
    #[serde(default = "default_base_digits")]
    pub base_digits: u32,
    #[serde(default = "default_min_multiplier")]
    pub min_multiplier: u64,
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: u64,
}

impl LargeNumberSpec {
    pub fn new(base_digits: u32, min_multiplier: u64, max_multiplier: u64) -> Self {
        Self {
            base_digits,
            min_multiplier,
            max_multiplier,
        }
    }
}

impl Default for LargeNumberSpec {
    fn default() -> Self {
        Self {
            base_digits: default_base_digits(),
            min_multiplier: default_min_multiplier(),
            max_multiplier: default_max_multiplier(),
        }
    }
}

/// How a counter's value is produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueSeed {
    /// A constant
    Fixed { value: f64 },
    /// Uniform number in `[min, max]` rounded to `decimals` places
    Uniform {
        min: f64,
        max: f64,
        #[serde(default)]
        decimals: u32,
    },
    /// Random base times random multiplier
    Large(LargeNumberSpec),
    /// Events accrued since local midnight on January 1st at `per_day` per day
    YearToDate { per_day: f64 },
    /// The world population figure resolved at startup
    Population,
}

impl Default for ValueSeed {
    fn default() -> Self {
        ValueSeed::Fixed { value: 0.0 }
    }
}
