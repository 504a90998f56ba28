//! Resolving [`ValueSeed`]s into concrete counter values.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use tickboard_types::ValueSeed;

use crate::constants::FALLBACK_POPULATION;
use crate::rng::{random_large_number, random_number, RandomSource};

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Inputs a seed may depend on besides randomness
#[derive(Debug, Clone, Copy)]
pub struct SeedContext {
    /// World population resolved at startup
    pub population: f64,
    /// Wall-clock instant used by year-to-date seeds
    pub now: DateTime<Local>,
}

impl SeedContext {
    pub fn new(population: f64) -> Self {
        Self {
            population,
            now: Local::now(),
        }
    }

    pub fn at(population: f64, now: DateTime<Local>) -> Self {
        Self { population, now }
    }
}

impl Default for SeedContext {
    fn default() -> Self {
        Self::new(FALLBACK_POPULATION)
    }
}

/// Events accrued between local midnight on January 1st and `now`
/// at an average of `per_day` events per day.
pub fn accrued_this_year(per_day: f64, now: DateTime<Local>) -> f64 {
    let start = NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| Local.from_local_datetime(&naive).earliest());

    let Some(start) = start else {
        log::warn!("Could not resolve the start of {} in local time", now.year());
        return 0.0;
    };

    let elapsed_ms = (now - start).num_milliseconds().max(0) as f64;
    elapsed_ms * (per_day / MILLIS_PER_DAY)
}

/// Produce a value for `seed`
pub fn resolve_seed<R: RandomSource + ?Sized>(seed: &ValueSeed, rng: &mut R, ctx: &SeedContext) -> f64 {
    match seed {
        ValueSeed::Fixed { value } => *value,
        ValueSeed::Uniform { min, max, decimals } => random_number(rng, *min, *max, *decimals),
        ValueSeed::Large(spec) => random_large_number(rng, *spec) as f64,
        ValueSeed::YearToDate { per_day } => accrued_this_year(*per_day, ctx.now),
        ValueSeed::Population => ctx.population,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tickboard_types::LargeNumberSpec;

    fn local(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .earliest()
            .unwrap()
    }

    #[test]
    fn test_accrued_at_new_year_is_zero() {
        assert_eq!(accrued_this_year(21.0, local(2025, 1, 1, 0)), 0.0);
    }

    #[test]
    fn test_accrued_after_one_day() {
        let value = accrued_this_year(21.0, local(2025, 1, 2, 0));
        assert!((value - 21.0).abs() < 1e-9, "got {}", value);
    }

    #[test]
    fn test_accrued_half_day_is_fractional() {
        let value = accrued_this_year(21.0, local(2025, 1, 1, 12));
        assert!((value - 10.5).abs() < 1e-9, "got {}", value);
    }

    #[test]
    fn test_resolve_each_seed_kind() {
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = SeedContext::at(7_900_000_000.0, local(2025, 1, 3, 0));

        assert_eq!(resolve_seed(&ValueSeed::Fixed { value: 134_928.0 }, &mut rng, &ctx), 134_928.0);
        assert_eq!(resolve_seed(&ValueSeed::Population, &mut rng, &ctx), 7_900_000_000.0);

        let uniform = resolve_seed(
            &ValueSeed::Uniform {
                min: 25.0,
                max: 999.0,
                decimals: 3,
            },
            &mut rng,
            &ctx,
        );
        assert!((25.0..=999.0).contains(&uniform));

        let large = resolve_seed(&ValueSeed::Large(LargeNumberSpec::new(6, 1, 10)), &mut rng, &ctx);
        assert!(large >= 0.0 && large <= 9_999_990.0);
        assert_eq!(large, large.trunc());

        let lies = resolve_seed(&ValueSeed::YearToDate { per_day: 21.0 }, &mut rng, &ctx);
        assert!((lies - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_context_uses_fallback_population() {
        assert_eq!(SeedContext::default().population, FALLBACK_POPULATION);
    }
}
