//! The outer operation loop: repeated scrolls over one captured region.

use std::time::Duration;

use log::info;
use rand::Rng;

use crate::constants;
use crate::coverage;
use crate::driver::{CancelToken, DriverError, InputDriver};
use crate::error::EngineError;
use crate::executor;
use crate::types::{EngineConfig, ExecutionSummary, MotionRequest, Pacing, Region, SessionConfig};

/// Aggregate totals for a finished (or aborted) session.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionReport {
    pub iterations: u64,
    pub total_units: u64,
    pub total_duration: Duration,
}

/// Scroll the region repeatedly with per-iteration randomized parameters.
///
/// Centers the pointer once, then loops: draw coverage, derive the
/// distance, draw the iteration's pacing, run one plan, idle. Runs until
/// the configured iteration bound, or indefinitely until cancellation or a
/// driver failure ends the session. An abort terminates the current and all
/// future plans; the shutdown totals are logged before it propagates.
pub fn run_session<D: InputDriver, R: Rng>(
    region: &Region,
    session: &SessionConfig,
    engine: &EngineConfig,
    driver: &mut D,
    cancel: &CancelToken,
    rng: &mut R,
) -> Result<SessionReport, EngineError> {
    let (cx, cy) = region.center();
    info!("centering pointer at ({cx}, {cy})");
    driver
        .move_pointer_to(cx, cy, Duration::from_secs_f64(constants::CENTER_GLIDE_SECS))
        .map_err(lift)?;

    let mut report = SessionReport::default();
    loop {
        let cov = coverage::draw_coverage(&session.coverage, rng);
        let distance = coverage::scroll_distance(cov, region.height, session.scale);
        let pacing = match session.target_rate {
            Some(rate) => Pacing::Rate(rate),
            None => Pacing::Duration(
                rng.random_range(session.duration_min_secs..session.duration_max_secs),
            ),
        };
        info!(
            "iteration {}: target {:.1} px (coverage {:.2}, scale {})",
            report.iterations + 1,
            distance,
            cov,
            session.scale
        );

        let request = MotionRequest {
            total_distance: distance,
            unit_size: session.unit_size,
            pacing,
        };
        match executor::run_plan(&request, session.direction, driver, engine, cancel, rng) {
            Ok(summary) => {
                report.iterations += 1;
                report.total_units += summary.realized_units;
                report.total_duration += summary.realized_duration;
                info!(
                    "scrolled ~{:.0} px this iteration",
                    summary.realized_units as f64 * session.unit_size
                );
            }
            Err(EngineError::Aborted(partial)) => {
                report.total_units += partial.realized_units;
                report.total_duration += partial.realized_duration;
                shutdown_report(&report, &partial);
                return Err(EngineError::Aborted(partial));
            }
            Err(e) => return Err(e),
        }

        if let Some(limit) = session.iterations {
            if report.iterations >= limit {
                break;
            }
        }

        // A reader settles on the new page before moving again.
        let idle = rng.random_range(session.idle_min_secs..session.idle_max_secs);
        info!("next scroll in ~{idle:.1}s");
        driver.wait(Duration::from_secs_f64(idle));
    }

    info!(
        "session finished: {} iterations, {} units, {:.1}s blocked",
        report.iterations,
        report.total_units,
        report.total_duration.as_secs_f64()
    );
    Ok(report)
}

fn shutdown_report(report: &SessionReport, partial: &ExecutionSummary) {
    info!(
        "session aborted: {} full iterations plus {} units of an interrupted plan, {} units and {:.1}s total",
        report.iterations,
        partial.realized_units,
        report.total_units,
        report.total_duration.as_secs_f64()
    );
}

fn lift(e: DriverError) -> EngineError {
    match e {
        DriverError::Abort => EngineError::Aborted(ExecutionSummary::default()),
        DriverError::Io(e) => EngineError::Driver(e),
    }
}
