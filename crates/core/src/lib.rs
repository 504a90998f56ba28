//! tickboard-core: Counter engine for the tickboard counter board.
//!
//! This crate contains the random number helpers, value seeding, the
//! validated [`CounterRegistry`] and the [`CounterSession`] tick engine.

pub mod constants;
mod digits;
mod registry;
pub mod rng;
pub mod seed;
mod session;
mod template;
mod ticker;

pub use constants::{
    FALLBACK_POPULATION, LAST_UPDATED_FORMAT, MAX_TICK_PERIOD_SECS, MIN_DISPLAY_DIGITS,
    TICK_JITTER_MIN, TICK_JITTER_SPAN,
};
pub use digits::required_digits;
pub use registry::{CounterRegistry, RegistryError};
pub use rng::{entropy_source, random_large_number, random_number, BoxedRandom, RandomSource};
pub use seed::{accrued_this_year, resolve_seed, SeedContext};
pub use session::{next_value, CounterSession, CounterSnapshot, SessionError, SessionPhase};
pub use template::CounterTemplate;
pub use ticker::{tick_period, TickHandle};

// Re-export types used in public signatures for convenience
pub use tickboard_types::{CounterDescriptor, DisasterType, LargeNumberSpec, ValueSeed};
