use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::coverage;
use crate::driver::{CancelToken, ConsoleDriver, DriverError, InputDriver};
use crate::envelope;
use crate::error::EngineError;
use crate::executor::{execute_plan, run_plan};
use crate::humanize;
use crate::planner;
use crate::session::run_session;
use crate::types::{
    CoverageConfig, Direction, EngineConfig, MotionRequest, PauseConfig, PauseKind, Plan,
    PlanKind, Region, SessionConfig, Step,
};

const EPS: f64 = 1e-9;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Engine config with pause injection switched off, for tests that need
/// exact wait accounting.
fn quiet_engine() -> EngineConfig {
    let mut cfg = EngineConfig::default();
    cfg.short_pause.chance = 0.0;
    cfg.long_pause.chance = 0.0;
    cfg
}

/// Hand-built natural plan: `step_count` steps of `units` each with a fixed
/// tiny wait.
fn uniform_plan(step_count: usize, units: u32) -> Plan {
    Plan {
        kind: PlanKind::Natural,
        steps: vec![
            Step {
                unit_count: units,
                wait: Duration::from_millis(1),
            };
            step_count
        ],
    }
}

/// Driver that records everything and never sleeps. Optionally raises the
/// abort signal once a set number of unit actions has been issued.
#[derive(Default)]
struct RecordingDriver {
    emits: Vec<Direction>,
    waits: Vec<Duration>,
    moves: Vec<(i32, i32)>,
    abort_after_units: Option<usize>,
}

impl InputDriver for RecordingDriver {
    fn emit_unit_action(&mut self, direction: Direction) -> Result<(), DriverError> {
        if let Some(limit) = self.abort_after_units {
            if self.emits.len() >= limit {
                return Err(DriverError::Abort);
            }
        }
        self.emits.push(direction);
        Ok(())
    }

    fn move_pointer_to(&mut self, x: i32, y: i32, _duration: Duration) -> Result<(), DriverError> {
        self.moves.push((x, y));
        Ok(())
    }

    fn pointer_position(&mut self) -> Result<(i32, i32), DriverError> {
        Ok(*self.moves.last().unwrap_or(&(0, 0)))
    }

    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

/// Driver that flips the shared cancellation token during its first wait.
#[derive(Default)]
struct CancellingDriver {
    token: CancelToken,
    emits: usize,
    waits: usize,
}

impl InputDriver for CancellingDriver {
    fn emit_unit_action(&mut self, _direction: Direction) -> Result<(), DriverError> {
        self.emits += 1;
        Ok(())
    }

    fn move_pointer_to(&mut self, _x: i32, _y: i32, _d: Duration) -> Result<(), DriverError> {
        Ok(())
    }

    fn pointer_position(&mut self) -> Result<(i32, i32), DriverError> {
        Ok((0, 0))
    }

    fn wait(&mut self, _duration: Duration) {
        self.waits += 1;
        self.token.cancel();
    }
}

// ============================================================================
// Velocity Envelope
// ============================================================================

#[test]
fn envelope_endpoints() {
    assert_eq!(envelope::progress(0.0), 0.0);
    assert!((envelope::progress(1.0) - 1.0).abs() < 1e-12);
}

#[test]
fn envelope_non_decreasing_over_fifty_points() {
    let mut previous = envelope::progress(0.0);
    for i in 1..=50 {
        let current = envelope::progress(i as f64 / 50.0);
        assert!(
            current >= previous,
            "progress regressed at sample {i}: {current} < {previous}"
        );
        previous = current;
    }
}

#[test]
fn envelope_is_pure() {
    let t = 0.37;
    assert_eq!(envelope::progress(t), envelope::progress(t));
}

#[test]
fn envelope_symmetric_about_midpoint() {
    for t in [0.1, 0.25, 0.4, 0.49] {
        let sum = envelope::progress(t) + envelope::progress(1.0 - t);
        assert!((sum - 1.0).abs() < EPS, "asymmetric at t={t}: {sum}");
    }
}

#[test]
fn envelope_samples_shape() {
    let samples = envelope::sample_progress(30);
    assert_eq!(samples.len(), 31);
    assert_eq!(samples[0], 0.0);
    assert!((samples[30] - 1.0).abs() < 1e-12);
    assert!(samples.windows(2).all(|w| w[1] >= w[0]));
}

// ============================================================================
// Natural Planner
// ============================================================================

#[test]
fn natural_plan_has_requested_step_count() {
    let plan =
        planner::plan_natural(1200.0, 2.0, 120.0, 30, &quiet_engine(), &mut rng(1)).unwrap();
    assert_eq!(plan.kind, PlanKind::Natural);
    assert_eq!(plan.steps.len(), 30);
}

#[test]
fn natural_waits_stay_inside_jitter_band() {
    let cfg = quiet_engine();
    let plan = planner::plan_natural(1200.0, 2.0, 120.0, 30, &cfg, &mut rng(2)).unwrap();
    let base = 2.0 / 30.0;
    for step in &plan.steps {
        let wait = step.wait.as_secs_f64();
        assert!(wait >= base * cfg.wait_jitter_min - EPS);
        assert!(wait <= base * cfg.wait_jitter_max + EPS);
    }
    let total = plan.total_wait().as_secs_f64();
    assert!(
        (1.0 - 1e-6..=3.0 + 1e-6).contains(&total),
        "total wait {total} outside the band around 2.0s"
    );
}

#[test]
fn natural_unit_total_within_rounding_bounds() {
    // Each step's count differs from its raw share by less than one unit,
    // so the total can never leave [exact - steps, exact + steps].
    let plan =
        planner::plan_natural(1200.0, 2.0, 120.0, 30, &quiet_engine(), &mut rng(3)).unwrap();
    let total = plan.total_units() as f64;
    assert!((total - 10.0).abs() <= 30.0, "total {total} outside bounds");
}

#[test]
fn natural_unit_total_mean_tracks_coin_flip_expectation() {
    // With 30 steps covering 10 units every raw share is fractional and
    // below one, so the unconditional coin flip yields half a unit per step
    // in expectation: mean total 15, within the steps/2 bound of exact 10.
    let cfg = quiet_engine();
    let trials = 300;
    let mut sum = 0.0;
    for seed in 0..trials {
        let plan = planner::plan_natural(1200.0, 2.0, 120.0, 30, &cfg, &mut rng(seed)).unwrap();
        sum += plan.total_units() as f64;
    }
    let mean = sum / trials as f64;
    assert!(
        (14.2..=15.8).contains(&mean),
        "mean unit total {mean} strayed from the 15.0 expectation"
    );
    assert!((mean - 10.0).abs() <= 30.0 * 0.5);
}

#[test]
fn stochastic_rounding_is_fair() {
    let mut r = rng(4);
    let mut floors = 0u32;
    for _ in 0..10_000 {
        match planner::stochastic_round(2.5, &mut r) {
            2 => floors += 1,
            3 => {}
            other => panic!("2.5 rounded to {other}"),
        }
    }
    // 6 sigma around the 5000 expectation.
    assert!(
        (4700..=5300).contains(&floors),
        "floor/ceil split {floors}/10000 is not fair"
    );
}

#[test]
fn stochastic_rounding_exact_integers_pass_through() {
    let mut r = rng(5);
    for _ in 0..20 {
        assert_eq!(planner::stochastic_round(3.0, &mut r), 3);
        assert_eq!(planner::stochastic_round(0.0, &mut r), 0);
    }
}

#[test]
fn natural_rejects_invalid_inputs() {
    let cfg = quiet_engine();
    let mut r = rng(6);
    for result in [
        planner::plan_natural(0.0, 2.0, 120.0, 30, &cfg, &mut r),
        planner::plan_natural(1200.0, 0.0, 120.0, 30, &cfg, &mut r),
        planner::plan_natural(1200.0, 2.0, -1.0, 30, &cfg, &mut r),
        planner::plan_natural(1200.0, 2.0, 120.0, 0, &cfg, &mut r),
        planner::plan_natural(f64::NAN, 2.0, 120.0, 30, &cfg, &mut r),
    ] {
        assert!(matches!(result, Err(EngineError::InvalidRequest(_))));
    }
}

// ============================================================================
// Bulk Planner
// ============================================================================

#[test]
fn bulk_chunks_and_paces_to_rate() {
    let cfg = quiet_engine();
    let plan = planner::plan_bulk(1000.0, 2000.0, 1.0, &cfg).unwrap();
    assert_eq!(plan.kind, PlanKind::Bulk);
    assert_eq!(plan.steps.len(), 67);

    let expected_wait = 0.5 / 67.0;
    for (i, step) in plan.steps.iter().enumerate() {
        let expected_units = if i == 66 { 10 } else { 15 };
        assert_eq!(step.unit_count, expected_units, "step {i}");
        assert!((step.wait.as_secs_f64() - expected_wait).abs() < EPS);
    }
    assert_eq!(plan.total_units(), 1000);
    assert!((plan.total_wait().as_secs_f64() - 0.5).abs() < 1e-6);
}

#[test]
fn bulk_even_division_keeps_full_last_chunk() {
    let plan = planner::plan_bulk(45.0, 100.0, 1.0, &quiet_engine()).unwrap();
    assert_eq!(plan.steps.len(), 3);
    assert!(plan.steps.iter().all(|s| s.unit_count == 15));
}

#[test]
fn bulk_duration_floor_prevents_busy_loop() {
    let cfg = quiet_engine();
    let plan = planner::plan_bulk(10.0, 1_000_000.0, 1.0, &cfg).unwrap();
    assert_eq!(plan.steps.len(), 1);
    assert_eq!(plan.steps[0].unit_count, 10);
    assert!((plan.total_wait().as_secs_f64() - cfg.bulk_min_duration_secs).abs() < EPS);
}

#[test]
fn bulk_sub_half_unit_distance_yields_empty_plan() {
    let plan = planner::plan_bulk(0.4, 100.0, 1.0, &quiet_engine()).unwrap();
    assert!(plan.steps.is_empty());
    assert_eq!(plan.total_units(), 0);
}

#[test]
fn bulk_rejects_invalid_inputs() {
    let cfg = quiet_engine();
    assert!(matches!(
        planner::plan_bulk(1000.0, 0.0, 1.0, &cfg),
        Err(EngineError::InvalidRequest(_))
    ));
    assert!(matches!(
        planner::plan_bulk(-5.0, 100.0, 1.0, &cfg),
        Err(EngineError::InvalidRequest(_))
    ));
}

#[test]
fn pacing_variant_selects_the_strategy() {
    let cfg = quiet_engine();
    let natural = planner::plan(&MotionRequest::natural(1200.0, 2.0, 120.0), &cfg, &mut rng(7))
        .unwrap();
    assert_eq!(natural.kind, PlanKind::Natural);
    let drawn = natural.steps.len() as u32;
    assert!((cfg.min_steps..=cfg.max_steps).contains(&drawn));

    let bulk =
        planner::plan(&MotionRequest::bulk(1200.0, 500.0, 120.0), &cfg, &mut rng(7)).unwrap();
    assert_eq!(bulk.kind, PlanKind::Bulk);
}

// ============================================================================
// Perturbation Layer
// ============================================================================

#[test]
fn pause_gate_respects_forced_probabilities() {
    let mut r = rng(8);
    let never = PauseConfig {
        chance: 0.0,
        min_secs: 0.3,
        max_secs: 1.2,
    };
    let always = PauseConfig {
        chance: 1.0,
        min_secs: 2.0,
        max_secs: 5.0,
    };
    for _ in 0..100 {
        assert!(humanize::maybe_pause(PauseKind::Short, &never, &mut r).is_none());
        let pause = humanize::maybe_pause(PauseKind::Long, &always, &mut r).unwrap();
        assert_eq!(pause.kind, PauseKind::Long);
        let secs = pause.duration.as_secs_f64();
        assert!((2.0 - EPS..5.0 + EPS).contains(&secs));
    }
}

#[test]
fn wait_jitter_stays_in_band() {
    let cfg = quiet_engine();
    let mut r = rng(9);
    for _ in 0..100 {
        let jitter = humanize::wait_jitter(&cfg, &mut r);
        assert!((cfg.wait_jitter_min..cfg.wait_jitter_max).contains(&jitter));
    }
}

// ============================================================================
// Coverage Driver
// ============================================================================

#[test]
fn coverage_policy_full_and_partial() {
    let full_only = CoverageConfig {
        partial_chance: 0.0,
        ..CoverageConfig::default()
    };
    let partial_only = CoverageConfig {
        partial_chance: 1.0,
        ..CoverageConfig::default()
    };

    let mut r = rng(10);
    for _ in 0..50 {
        assert_eq!(coverage::draw_coverage(&full_only, &mut r), 0.95);
        let partial = coverage::draw_coverage(&partial_only, &mut r);
        assert!((0.5..0.9).contains(&partial));
    }
}

#[test]
fn coverage_distance_formula() {
    let distance = coverage::scroll_distance(0.95, 1000, 2.0);
    assert!((distance - 1900.0).abs() < EPS);
}

#[test]
fn region_normalizes_corner_order() {
    let region = Region::from_corners((300, 400), (100, 150));
    assert_eq!(
        region,
        Region {
            left: 100,
            top: 150,
            width: 200,
            height: 250
        }
    );
    assert_eq!(region.center(), (200, 275));
}

// ============================================================================
// Executor
// ============================================================================

#[test]
fn bulk_execution_never_pauses() {
    let cfg = EngineConfig::default();
    let plan = planner::plan_bulk(300.0, 600.0, 1.0, &cfg).unwrap();
    let mut driver = RecordingDriver::default();
    let summary = execute_plan(
        &plan,
        Direction::Forward,
        &mut driver,
        &cfg,
        &CancelToken::new(),
        &mut rng(11),
    )
    .unwrap();

    assert_eq!(summary.pauses_injected, 0);
    assert_eq!(summary.realized_units, plan.total_units());
    assert_eq!(driver.emits.len() as u64, plan.total_units());
    // Only the step waits were performed.
    assert_eq!(driver.waits.len(), plan.steps.len());
    assert_eq!(driver.waits.iter().sum::<Duration>(), plan.total_wait());
}

#[test]
fn natural_execution_accounts_for_waits_and_pauses() {
    let mut cfg = quiet_engine();
    cfg.short_pause.chance = 1.0;

    let plan = uniform_plan(10, 2);
    let mut driver = RecordingDriver::default();
    let summary = execute_plan(
        &plan,
        Direction::Backward,
        &mut driver,
        &cfg,
        &CancelToken::new(),
        &mut rng(12),
    )
    .unwrap();

    assert_eq!(summary.steps_executed, 10);
    assert_eq!(summary.realized_units, 20);
    assert_eq!(summary.pauses_injected, 10);
    assert!(driver.emits.iter().all(|d| *d == Direction::Backward));
    // One step wait plus one short pause per step.
    assert_eq!(driver.waits.len(), 20);
    assert_eq!(
        summary.realized_duration,
        driver.waits.iter().sum::<Duration>()
    );
}

#[test]
fn driver_abort_stops_the_stream_mid_plan() {
    let cfg = quiet_engine();
    let plan = uniform_plan(30, 2);
    let mut driver = RecordingDriver {
        abort_after_units: Some(9),
        ..RecordingDriver::default()
    };

    let err = execute_plan(
        &plan,
        Direction::Forward,
        &mut driver,
        &cfg,
        &CancelToken::new(),
        &mut rng(13),
    )
    .unwrap_err();

    match err {
        EngineError::Aborted(summary) => {
            // Abort hit during step 5; its wait and all later steps never ran.
            assert_eq!(summary.realized_units, 9);
            assert_eq!(summary.steps_executed, 4);
            assert_eq!(driver.emits.len(), 9);
            assert_eq!(driver.waits.len(), 4);
        }
        other => panic!("expected abort, got {other:?}"),
    }
}

#[test]
fn cancellation_is_observed_at_the_next_step_boundary() {
    let cfg = quiet_engine();
    let plan = uniform_plan(10, 1);
    let mut driver = CancellingDriver::default();
    let token = driver.token.clone();

    let err = execute_plan(&plan, Direction::Forward, &mut driver, &cfg, &token, &mut rng(14))
        .unwrap_err();

    match err {
        EngineError::Aborted(summary) => {
            assert_eq!(summary.realized_units, 1);
            assert_eq!(summary.steps_executed, 1);
            assert_eq!(driver.emits, 1);
        }
        other => panic!("expected abort, got {other:?}"),
    }
}

#[test]
fn invalid_request_issues_no_actions() {
    let mut driver = RecordingDriver::default();
    let err = run_plan(
        &MotionRequest::natural(0.0, 2.0, 120.0),
        Direction::Forward,
        &mut driver,
        &EngineConfig::default(),
        &CancelToken::new(),
        &mut rng(15),
    )
    .unwrap_err();

    assert!(matches!(err, EngineError::InvalidRequest(_)));
    assert!(driver.emits.is_empty());
    assert!(driver.waits.is_empty());
}

#[test]
fn run_plan_natural_end_to_end() {
    let cfg = quiet_engine();
    let mut driver = RecordingDriver::default();
    let summary = run_plan(
        &MotionRequest::natural(1140.0, 1.0, 120.0),
        Direction::Forward,
        &mut driver,
        &cfg,
        &CancelToken::new(),
        &mut rng(16),
    )
    .unwrap();

    let steps = summary.steps_executed as u32;
    assert!((cfg.min_steps..=cfg.max_steps).contains(&steps));
    let blocked = summary.realized_duration.as_secs_f64();
    assert!((cfg.wait_jitter_min - 1e-6..=cfg.wait_jitter_max + 1e-6).contains(&blocked));
    assert_eq!(driver.emits.len() as u64, summary.realized_units);
}

// ============================================================================
// Session Loop
// ============================================================================

#[test]
fn bounded_session_runs_the_requested_iterations() {
    let session = SessionConfig {
        iterations: Some(2),
        ..SessionConfig::default()
    };
    let region = Region {
        left: 0,
        top: 0,
        width: 800,
        height: 600,
    };
    let mut driver = RecordingDriver::default();

    let report = run_session(
        &region,
        &session,
        &EngineConfig::default(),
        &mut driver,
        &CancelToken::new(),
        &mut rng(17),
    )
    .unwrap();

    assert_eq!(report.iterations, 2);
    assert_eq!(driver.moves, vec![(400, 300)]);
    assert_eq!(report.total_units, driver.emits.len() as u64);
    assert!(!driver.waits.is_empty());
}

#[test]
fn session_propagates_an_abort() {
    let session = SessionConfig {
        iterations: Some(5),
        ..SessionConfig::default()
    };
    let region = Region {
        left: 0,
        top: 0,
        width: 800,
        height: 2400,
    };
    let mut driver = RecordingDriver {
        abort_after_units: Some(3),
        ..RecordingDriver::default()
    };

    let err = run_session(
        &region,
        &session,
        &EngineConfig::default(),
        &mut driver,
        &CancelToken::new(),
        &mut rng(18),
    )
    .unwrap_err();

    match err {
        EngineError::Aborted(partial) => {
            // The failsafe fired on the fourth unit action overall; the
            // interrupted plan realized at most those first three.
            assert_eq!(driver.emits.len(), 3);
            assert!(partial.realized_units <= 3);
        }
        other => panic!("expected abort, got {other:?}"),
    }
}

// ============================================================================
// Console Driver
// ============================================================================

#[test]
fn console_driver_tracks_offset_and_pointer() {
    let mut driver = ConsoleDriver::new();
    for _ in 0..3 {
        driver.emit_unit_action(Direction::Forward).unwrap();
    }
    driver.emit_unit_action(Direction::Backward).unwrap();
    assert_eq!(driver.offset_units(), 2);

    driver.move_pointer_to(5, 6, Duration::ZERO).unwrap();
    assert_eq!(driver.pointer_position().unwrap(), (5, 6));
}
