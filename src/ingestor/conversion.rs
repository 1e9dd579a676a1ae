//! Field conversions applied to raw CSV text
//!
//! Every helper returns a `Result` or `Option`; the parser decides what a
//! failure means for the row.

use std::num::{ParseFloatError, ParseIntError};

/// Parse a base-10 counting stat
pub fn parse_integer(raw: &str) -> Result<u32, ParseIntError> {
    raw.parse::<u32>()
}

/// Parse a decimal stat, rejecting NaN and infinities
pub fn parse_float(raw: &str) -> Option<f64> {
    let parsed: Result<f64, ParseFloatError> = raw.parse();
    parsed.ok().filter(|value| value.is_finite())
}

/// Round to a fixed number of decimal places, halves away from zero
///
/// The result is persisted as-is, so this must stay `round(v * 10^p) / 10^p`.
pub fn round_to(value: f64, places: u32) -> f64 {
    let ratio = 10f64.powi(places as i32);
    (value * ratio).round() / ratio
}

/// Convert a rate stored as a fraction (0.085) into a percentage (8.5)
pub fn as_percentage(fraction: f64) -> f64 {
    fraction * 100.0
}

/// Inverse of [`as_percentage`], used when writing records back out
pub fn as_fraction(percentage: f64) -> f64 {
    percentage / 100.0
}

/// Drop the fractional part of a float stat (104.9 becomes 104)
///
/// Returns `None` when the value does not fit an `i32`.
pub fn truncate_to_int(value: f64) -> Option<i32> {
    let truncated = value.trunc();
    if truncated >= i32::MIN as f64 && truncated <= i32::MAX as f64 {
        Some(truncated as i32)
    } else {
        None
    }
}
