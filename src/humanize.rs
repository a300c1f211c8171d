//! Stochastic perturbation: wait jitter and Bernoulli-gated pauses.

use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::types::{EngineConfig, PauseConfig, PauseEvent, PauseKind};

/// Draw the multiplier applied to one step's base wait.
///
/// Independent per step and never re-normalized against the requested total,
/// so the realized duration approximates the target with an unbiased mean.
pub fn wait_jitter<R: Rng>(config: &EngineConfig, rng: &mut R) -> f64 {
    rng.random_range(config.wait_jitter_min..config.wait_jitter_max)
}

/// Evaluate one pause source. Redraws on every call; no state is carried
/// between steps, and the gate draw is independent of the duration draw.
pub fn maybe_pause<R: Rng>(
    kind: PauseKind,
    config: &PauseConfig,
    rng: &mut R,
) -> Option<PauseEvent> {
    if !rng.random_bool(config.chance.clamp(0.0, 1.0)) {
        return None;
    }
    let secs = rng.random_range(config.min_secs..config.max_secs);
    debug!("{kind:?} pause: {secs:.2}s");
    Some(PauseEvent {
        kind,
        duration: Duration::from_secs_f64(secs),
    })
}
