//! Motion plan discretization.
//!
//! Two strategies share one plan shape. The natural planner spreads a
//! distance over a duration by discretizing the velocity envelope into many
//! small, irregular steps. The bulk planner trades that fidelity for
//! throughput: constant-size bursts at a uniform, minimal wait, sized to hit
//! a target rate.

use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::envelope;
use crate::error::EngineError;
use crate::humanize;
use crate::types::{EngineConfig, MotionRequest, Pacing, Plan, PlanKind, Step};

// ============================================================================
// Mode Dispatch
// ============================================================================

/// Build a plan for `request`, choosing the strategy from its pacing.
///
/// Natural pacing draws the step count uniformly from the configured range;
/// bulk pacing derives it from the chunk size. Invalid inputs are rejected
/// here, before any step exists.
pub fn plan<R: Rng>(
    request: &MotionRequest,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<Plan, EngineError> {
    validate_config(config)?;
    match request.pacing {
        Pacing::Duration(total_duration) => {
            let step_count = rng.random_range(config.min_steps..=config.max_steps) as usize;
            plan_natural(
                request.total_distance,
                total_duration,
                request.unit_size,
                step_count,
                config,
                rng,
            )
        }
        Pacing::Rate(target_rate) => {
            plan_bulk(request.total_distance, target_rate, request.unit_size, config)
        }
    }
}

fn validate_config(config: &EngineConfig) -> Result<(), EngineError> {
    if config.min_steps == 0 || config.min_steps > config.max_steps {
        return Err(EngineError::InvalidRequest(
            "step count range must be non-empty and start at 1 or more",
        ));
    }
    if !(config.wait_jitter_min >= 0.0 && config.wait_jitter_min < config.wait_jitter_max) {
        return Err(EngineError::InvalidRequest(
            "wait jitter band must be non-negative and non-empty",
        ));
    }
    if config.bulk_chunk_units == 0 {
        return Err(EngineError::InvalidRequest(
            "bulk chunk size must be at least one unit",
        ));
    }
    Ok(())
}

fn validate_magnitudes(total_distance: f64, unit_size: f64) -> Result<(), EngineError> {
    if !(total_distance.is_finite() && total_distance > 0.0) {
        return Err(EngineError::InvalidRequest("total distance must be positive"));
    }
    if !(unit_size.is_finite() && unit_size > 0.0) {
        return Err(EngineError::InvalidRequest("unit size must be positive"));
    }
    Ok(())
}

// ============================================================================
// Natural Mode
// ============================================================================

/// Discretize the envelope into `step_count` steps covering
/// `total_distance` over roughly `total_duration` seconds.
///
/// Each step takes the envelope's share of the distance for its time slice,
/// discretized by stochastic rounding, and a base wait of
/// `total_duration / step_count` scaled by an independent jitter draw.
pub fn plan_natural<R: Rng>(
    total_distance: f64,
    total_duration: f64,
    unit_size: f64,
    step_count: usize,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<Plan, EngineError> {
    validate_magnitudes(total_distance, unit_size)?;
    if !(total_duration.is_finite() && total_duration > 0.0) {
        return Err(EngineError::InvalidRequest("total duration must be positive"));
    }
    if step_count == 0 {
        return Err(EngineError::InvalidRequest("step count must be at least 1"));
    }

    let total_units = total_distance / unit_size;
    let samples = envelope::sample_progress(step_count);
    let base_wait = total_duration / step_count as f64;

    let mut steps = Vec::with_capacity(step_count);
    for i in 1..=step_count {
        let fraction = samples[i] - samples[i - 1];
        let raw_units = fraction * total_units;
        let wait_secs = base_wait * humanize::wait_jitter(config, rng);
        steps.push(Step {
            unit_count: stochastic_round(raw_units, rng),
            wait: Duration::from_secs_f64(wait_secs),
        });
    }

    let plan = Plan {
        kind: PlanKind::Natural,
        steps,
    };
    debug!(
        "natural plan: {} steps, {} units for ~{:.2} needed, ~{:.2}s target",
        step_count,
        plan.total_units(),
        total_units,
        total_duration
    );
    Ok(plan)
}

/// Discretize a fractional unit count: floor or ceil with equal probability,
/// regardless of the fractional part.
///
/// Consistent rounding would drift the cumulative distance in one direction
/// and leave a periodic residue in the step sizes; the coin flip removes
/// both at the cost of a bounded per-step error. The 50/50 split is
/// unconditional, so a raw count of 0.9 still floors half the time.
pub fn stochastic_round<R: Rng>(raw_units: f64, rng: &mut R) -> u32 {
    let raw = raw_units.max(0.0);
    let chosen = if rng.random_bool(0.5) {
        raw.floor()
    } else {
        raw.ceil()
    };
    chosen as u32
}

// ============================================================================
// Bulk Mode
// ============================================================================

/// Chunk `total_distance` into constant bursts paced to `target_rate`.
///
/// Every step carries exactly the configured chunk except the last, which
/// carries the remainder. The shared wait is `time_needed / step_count`
/// where `time_needed` is the rate formula floored to the configured
/// minimum. No envelope, no jitter; pause injection never applies to the
/// resulting plan.
pub fn plan_bulk(
    total_distance: f64,
    target_rate: f64,
    unit_size: f64,
    config: &EngineConfig,
) -> Result<Plan, EngineError> {
    validate_magnitudes(total_distance, unit_size)?;
    if !(target_rate.is_finite() && target_rate > 0.0) {
        return Err(EngineError::InvalidRequest("target rate must be positive"));
    }

    // Nearest whole unit keeps the distance error within half a unit. A
    // sub-half-unit distance yields an empty plan rather than a busy loop.
    let whole_units = (total_distance / unit_size).round() as u64;
    if whole_units == 0 {
        return Ok(Plan {
            kind: PlanKind::Bulk,
            steps: Vec::new(),
        });
    }

    let chunk = u64::from(config.bulk_chunk_units);
    let step_count = whole_units.div_ceil(chunk) as usize;
    let time_needed = (total_distance / target_rate).max(config.bulk_min_duration_secs);
    let wait = Duration::from_secs_f64(time_needed / step_count as f64);

    let mut steps = Vec::with_capacity(step_count);
    let mut remaining = whole_units;
    while remaining > 0 {
        let unit_count = remaining.min(chunk) as u32;
        steps.push(Step { unit_count, wait });
        remaining -= u64::from(unit_count);
    }

    debug!(
        "bulk plan: {} steps of {} units, {:.4}s per step",
        step_count,
        config.bulk_chunk_units,
        wait.as_secs_f64()
    );
    Ok(Plan {
        kind: PlanKind::Bulk,
        steps,
    })
}
