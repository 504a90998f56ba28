//! Shared constants for the counter engine

/// Population used whenever the live statistics API cannot be reached
pub const FALLBACK_POPULATION: f64 = 8_000_000_000.0;

/// Lower bound of the per-tick jitter applied to a counter's rate
pub const TICK_JITTER_MIN: f64 = 0.8;

/// Width of the per-tick jitter window, so the multiplier lies in `[0.8, 1.2)`
pub const TICK_JITTER_SPAN: f64 = 0.4;

/// Narrowest digit width a counter is ever displayed with
pub const MIN_DISPLAY_DIGITS: usize = 3;

/// Format of the "last updated" stamp shown under a counter
pub const LAST_UPDATED_FORMAT: &str = "%H:%M:%S";

/// Longest interval a timer is armed with, in seconds (one year)
pub const MAX_TICK_PERIOD_SECS: f64 = 365.0 * 24.0 * 60.0 * 60.0;
