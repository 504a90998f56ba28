//! tickboard-sources: Value sources for the tickboard counter board.
//!
//! Holds the world population fetcher and the catalogue of built-in counters.

pub mod catalog;
mod population;

pub use catalog::{builtin_counters, builtin_templates, instantiate_all, BIRTH_RATE, DEATH_RATE};
pub use population::{
    parse_population, FetchError, PopulationFetcher, DEFAULT_FETCH_TIMEOUT,
    DEFAULT_POPULATION_ENDPOINT,
};
