//! Counter descriptor: the static configuration record for one counter.

use serde::{Deserialize, Serialize};

use crate::disaster::DisasterType;
use crate::seed::ValueSeed;

fn default_rate() -> f64 {
    1.0
}

fn default_speed() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// One counter on the board
///
/// `value` is the magnitude the counter shows when it becomes active. It is
/// mutable over the lifetime of the owning registry: counters with a
/// `reseed` rule get a fresh value every time they are switched to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterDescriptor {
    /// Unique key within a registry
    pub id: String,
    /// Headline shown above the number
    pub title: String,
    /// Smaller line shown under the title
    #[serde(default)]
    pub subtitle: String,
    /// Current magnitude
    #[serde(default)]
    pub value: f64,
    /// Average change per tick (non-negative)
    #[serde(default = "default_rate")]
    pub rate: f64,
    /// Seconds between ticks (positive)
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Whether ticks increase (`true`) or decrease the value
    #[serde(default = "default_true")]
    pub is_positive: bool,
    /// Rule used to regenerate `value` when the counter is switched to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reseed: Option<ValueSeed>,
    /// Disaster table (configuration only, never consulted by the engine)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disasters: Vec<DisasterType>,
}

impl CounterDescriptor {
    /// Create a descriptor with the given identity and default dynamics
    /// (value 0, one unit per second, increasing).
    pub fn new(id: impl Into<String>, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            value: 0.0,
            rate: default_rate(),
            speed: default_speed(),
            is_positive: true,
            reseed: None,
            disasters: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn decreasing(mut self) -> Self {
        self.is_positive = false;
        self
    }

    pub fn with_reseed(mut self, seed: ValueSeed) -> Self {
        self.reseed = Some(seed);
        self
    }

    pub fn with_disasters(mut self, disasters: Vec<DisasterType>) -> Self {
        self.disasters = disasters;
        self
    }

    /// Signed direction of a tick (+1.0 or -1.0)
    pub fn direction(&self) -> f64 {
        if self.is_positive {
            1.0
        } else {
            -1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{"id":"coffee","title":"Coffees"}"#;
        let descriptor: CounterDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(descriptor.id, "coffee");
        assert_eq!(descriptor.subtitle, "");
        assert_eq!(descriptor.value, 0.0);
        assert_eq!(descriptor.rate, 1.0);
        assert_eq!(descriptor.speed, 1.0);
        assert!(descriptor.is_positive);
        assert!(descriptor.reseed.is_none());
        assert!(descriptor.disasters.is_empty());
    }

    #[test]
    fn test_optional_fields_are_omitted_when_empty() {
        let descriptor = CounterDescriptor::new("jello", "Jello Shots", "(Tonight)");
        let json = serde_json::to_string(&descriptor).unwrap();

        assert!(!json.contains("reseed"));
        assert!(!json.contains("disasters"));
    }

    #[test]
    fn test_direction() {
        let up = CounterDescriptor::new("a", "A", "");
        let down = CounterDescriptor::new("b", "B", "").decreasing();

        assert_eq!(up.direction(), 1.0);
        assert_eq!(down.direction(), -1.0);
    }
}
