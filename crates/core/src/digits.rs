//! Display width of a counter value

use crate::constants::MIN_DISPLAY_DIGITS;

/// Number of digits needed to show `value`: `max(3, ceil(log10(value + 1)))`.
///
/// Computed by comparing against exact powers of ten instead of taking a
/// logarithm. Zero, negative and non-finite values all map to the minimum.
pub fn required_digits(value: f64) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return MIN_DISPLAY_DIGITS;
    }

    let target = value + 1.0;
    let mut digits = 0usize;
    let mut power = 1.0f64;
    while power < target && digits < 309 {
        power *= 10.0;
        digits += 1;
    }

    digits.max(MIN_DISPLAY_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_width() {
        assert_eq!(required_digits(0.0), 3);
        assert_eq!(required_digits(7.0), 3);
        assert_eq!(required_digits(999.0), 3);
    }

    #[test]
    fn test_width_grows_at_powers_of_ten() {
        assert_eq!(required_digits(1000.0), 4);
        assert_eq!(required_digits(9_999.0), 4);
        assert_eq!(required_digits(10_000.0), 5);
        assert_eq!(required_digits(8_000_000_000.0), 10);
    }

    #[test]
    fn test_fractional_values_round_up() {
        // log10(1000.5) is just above 3
        assert_eq!(required_digits(999.5), 4);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(required_digits(-1.0), 3);
        assert_eq!(required_digits(-12_345.0), 3);
        assert_eq!(required_digits(f64::NAN), 3);
        assert_eq!(required_digits(f64::INFINITY), 3);
    }
}
