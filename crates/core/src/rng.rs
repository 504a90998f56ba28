//! Bounded random number helpers.
//!
//! Every helper takes its randomness from a [`RandomSource`] so sessions and
//! tests can inject a seeded generator.

use rand::Rng;
use tickboard_types::LargeNumberSpec;

/// Source of uniform floats in `[0, 1)`
pub trait RandomSource: Send {
    fn next_f64(&mut self) -> f64;
}

impl<R: Rng + Send> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Boxed source used where the concrete generator is chosen at runtime
pub type BoxedRandom = Box<dyn RandomSource>;

/// An entropy-seeded generator for production use
pub fn entropy_source() -> BoxedRandom {
    use rand::SeedableRng;
    Box::new(rand::rngs::StdRng::from_entropy())
}

/// Round `value` to `decimals` decimal places (half away from zero)
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals == 0 {
        return value.round();
    }
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Uniform number in `[min, max]` rounded to `decimals` places.
///
/// Rounding can push a sample past a bound that has more precision than
/// `decimals`, so the result is clamped back into range.
pub fn random_number<R: RandomSource + ?Sized>(rng: &mut R, min: f64, max: f64, decimals: u32) -> f64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let sample = rng.next_f64() * (hi - lo) + lo;
    round_to(sample, decimals).clamp(lo, hi)
}

/// Product of a base in `[0, 10^base_digits)` and a multiplier in
/// `[min_multiplier, max_multiplier]`.
pub fn random_large_number<R: RandomSource + ?Sized>(rng: &mut R, spec: LargeNumberSpec) -> u64 {
    let span = 10f64.powi(spec.base_digits.min(19) as i32);
    let base = ((rng.next_f64() * span).floor() as u64).min(span as u64 - 1);

    let (lo, hi) = if spec.min_multiplier <= spec.max_multiplier {
        (spec.min_multiplier, spec.max_multiplier)
    } else {
        (spec.max_multiplier, spec.min_multiplier)
    };
    let choices = (hi - lo).saturating_add(1);
    let offset = ((rng.next_f64() * choices as f64).floor() as u64).min(choices - 1);

    base.saturating_mul(lo + offset)
}

/// Uniform index in `[0, len)`. `len` must be non-zero.
pub fn pick_index<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0, "pick_index on an empty range");
    ((rng.next_f64() * len as f64).floor() as usize).min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays a fixed list of samples
    struct Scripted(Vec<f64>, usize);

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    fn fractional_digits(value: f64) -> usize {
        let text = format!("{}", value);
        text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
    }

    #[test]
    fn test_random_number_bounds_and_precision() {
        let mut rng = StdRng::seed_from_u64(7);
        for decimals in 0..=4 {
            for _ in 0..500 {
                let value = random_number(&mut rng, 12.0, 999.0, decimals);
                assert!((12.0..=999.0).contains(&value), "{} out of range", value);
                assert!(fractional_digits(value) <= decimals as usize, "{} has too many digits", value);
            }
        }
    }

    #[test]
    fn test_random_number_integer_when_no_decimals() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let value = random_number(&mut rng, -5.0, 5.0, 0);
            assert_eq!(value, value.trunc());
        }
    }

    #[test]
    fn test_random_number_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_number(&mut rng, 4.0, 4.0, 2), 4.0);
    }

    #[test]
    fn test_random_number_clamps_after_rounding() {
        let mut rng = Scripted(vec![0.999_999], 0);
        let value = random_number(&mut rng, 1.0, 1.26, 1);
        assert!(value <= 1.26);
    }

    #[test]
    fn test_random_large_number_extremes() {
        let spec = LargeNumberSpec::new(6, 2, 5);

        let mut low = Scripted(vec![0.0], 0);
        assert_eq!(random_large_number(&mut low, spec), 0);

        let mut high = Scripted(vec![0.999_999_999], 0);
        assert_eq!(random_large_number(&mut high, spec), 999_999 * 5);
    }

    #[test]
    fn test_random_large_number_spread() {
        let mut rng = StdRng::seed_from_u64(42);
        let spec = LargeNumberSpec::default();
        let limit = (10u64.pow(spec.base_digits) - 1) * spec.max_multiplier;

        let samples: Vec<u64> = (0..2_000).map(|_| random_large_number(&mut rng, spec)).collect();
        assert!(samples.iter().all(|&s| s <= limit));

        let max = *samples.iter().max().unwrap();
        let min = *samples.iter().min().unwrap();
        assert!(max > 10u64.pow(spec.base_digits), "samples never exceeded the base range");
        assert!(min < 10u64.pow(spec.base_digits) * 10, "samples never came near the bottom");
    }

    #[test]
    fn test_pick_index_covers_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [false; 14];
        for _ in 0..1_000 {
            seen[pick_index(&mut rng, seen.len())] = true;
        }
        assert!(seen.iter().all(|&hit| hit));
    }
}
