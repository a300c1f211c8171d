//! Mode-agnostic plan execution.

use log::info;
use rand::Rng;

use crate::driver::{CancelToken, DriverError, InputDriver};
use crate::error::EngineError;
use crate::humanize;
use crate::planner;
use crate::types::{
    Direction, EngineConfig, ExecutionSummary, MotionRequest, PauseKind, Plan, PlanKind,
};

/// Plan and execute one motion request.
///
/// The entry point for one scheduler invocation: builds the plan for the
/// request's pacing, then runs it. Returns what was realized, or
/// [`EngineError::Aborted`] carrying the partial summary when cancellation
/// cut the plan short.
pub fn run_plan<D: InputDriver, R: Rng>(
    request: &MotionRequest,
    direction: Direction,
    driver: &mut D,
    config: &EngineConfig,
    cancel: &CancelToken,
    rng: &mut R,
) -> Result<ExecutionSummary, EngineError> {
    let plan = planner::plan(request, config, rng)?;
    execute_plan(&plan, direction, driver, config, cancel, rng)
}

/// Execute a prebuilt plan step by step.
///
/// Steps run strictly in sequence: each step's burst is fully issued before
/// its wait begins, and the wait fully elapses before the next step starts.
/// The cancellation token is checked at every step boundary; an abort from
/// the driver mid-burst stops the remaining units of that burst too.
pub fn execute_plan<D: InputDriver, R: Rng>(
    plan: &Plan,
    direction: Direction,
    driver: &mut D,
    config: &EngineConfig,
    cancel: &CancelToken,
    rng: &mut R,
) -> Result<ExecutionSummary, EngineError> {
    let mut summary = ExecutionSummary::default();

    info!(
        "executing {:?} plan: {} steps, {} units queued",
        plan.kind,
        plan.steps.len(),
        plan.total_units()
    );

    for (index, step) in plan.steps.iter().enumerate() {
        // 1. Cancellation checkpoint, once per step boundary.
        if cancel.is_cancelled() {
            info!("cancellation observed before step {}", index + 1);
            return Err(EngineError::Aborted(summary));
        }

        // 2. The step's unit-action burst.
        for _ in 0..step.unit_count {
            match driver.emit_unit_action(direction) {
                Ok(()) => summary.realized_units += 1,
                Err(DriverError::Abort) => {
                    info!("abort signal during step {}", index + 1);
                    return Err(EngineError::Aborted(summary));
                }
                Err(DriverError::Io(e)) => return Err(EngineError::Driver(e)),
            }
        }

        // 3. The step's own wait.
        driver.wait(step.wait);
        summary.realized_duration += step.wait;
        summary.steps_executed += 1;

        // 4. Perturbation layer, natural plans only. Both sources are
        //    evaluated independently; a step may draw neither, one, or both.
        if plan.kind == PlanKind::Natural {
            let pauses = [
                humanize::maybe_pause(PauseKind::Short, &config.short_pause, rng),
                humanize::maybe_pause(PauseKind::Long, &config.long_pause, rng),
            ];
            for pause in pauses.into_iter().flatten() {
                driver.wait(pause.duration);
                summary.realized_duration += pause.duration;
                summary.pauses_injected += 1;
            }
        }
    }

    info!(
        "plan complete: {} units over {:.2}s, {} pauses",
        summary.realized_units,
        summary.realized_duration.as_secs_f64(),
        summary.pauses_injected
    );
    Ok(summary)
}
