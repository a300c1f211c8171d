//! Normalized velocity envelope: slow start, speed up, slow down.

use std::f64::consts::PI;

/// Cumulative progress at normalized time `t` in `[0, 1]`.
///
/// Half-cosine ease: `0.5 * (1 - cos(pi * t))`. Starts at 0, ends at 1,
/// strictly increasing, symmetric about `t = 0.5`, with zero slope at both
/// ends so a discretized plan naturally begins and finishes with small
/// increments. Pure and deterministic; callers clamp the domain.
pub fn progress(t: f64) -> f64 {
    0.5 * (1.0 - (PI * t).cos())
}

/// Sample the envelope at `step_count + 1` evenly spaced instants.
///
/// The result is non-decreasing with `samples[0] == 0.0` and
/// `samples[step_count] == 1.0`; adjacent differences give each step's share
/// of the total distance. `step_count` must be at least 1.
pub fn sample_progress(step_count: usize) -> Vec<f64> {
    let mut samples = Vec::with_capacity(step_count + 1);
    for i in 0..=step_count {
        samples.push(progress(i as f64 / step_count as f64));
    }
    samples
}
