//! Number rounding and C literal formatting

/// Round `value` to `digits` decimal places.
///
/// Rounds the exact binary value, so `1.005` (stored as 1.00499..) becomes
/// `1.0`. Going through the decimal formatter avoids the drift of
/// multiply-round-divide.
pub fn round_decimals(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Format a float as a C floating literal.
///
/// Uses the shortest representation that round-trips and always keeps a
/// decimal point or exponent so the literal stays a double.
pub fn c_float(value: f64) -> String {
    format!("{value:?}")
}

/// Format a float in exponent notation (`1e6`).
pub fn c_float_exp(value: f64) -> String {
    format!("{value:e}")
}
