//! Output-boundary rounding.

/// Round to 2 decimal places, half away from zero.
///
/// Amounts are accumulated at full precision and only rounded when a result
/// leaves the engine.
pub fn round2(value: f64) -> f64 {
    let scaled = (value * 100.0).round() / 100.0;
    // Normalize -0.0 so serialized output never shows "-0.0".
    if scaled == 0.0 { 0.0 } else { scaled }
}
