//! Small numeric helpers shared across the engine.

use rand::Rng;

/// Rounds `value` to `decimals` decimal places.
pub fn round_dp(value: f32, decimals: i32) -> f32 {
    let factor = 10f32.powi(decimals);
    (value * factor).round() / factor
}

/// Uniform draw in `[low, high)`. Returns `low` for an empty range.
pub fn uniform<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high <= low {
        return low;
    }
    low + rng.random::<f32>() * (high - low)
}

/// Returns `true` with probability `p`.
pub fn chance<R: Rng>(rng: &mut R, p: f32) -> bool {
    rng.random::<f32>() < p
}
