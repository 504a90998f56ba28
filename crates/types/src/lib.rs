//! tickboard-types: Shared data types for the tickboard counter board.
//!
//! This crate contains pure data types (counter descriptors, value seeds,
//! disaster tables) shared across all tickboard crates. Nothing here touches
//! timers, randomness or the network.

pub mod descriptor;
pub mod disaster;
pub mod seed;

// Re-export commonly used types at the crate root for convenience
pub use descriptor::CounterDescriptor;
pub use disaster::DisasterType;
pub use seed::{LargeNumberSpec, ValueSeed};
