use std::time::Duration;

use crate::constants;

/// How a motion request's timing target is expressed.
///
/// Exactly one target is meaningful per request: a duration budget produces
/// the natural (envelope-shaped) discretization, a rate target produces the
/// bulk (throughput) discretization. Keeping the choice in the data lets the
/// executor stay mode-agnostic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pacing {
    /// Spread the distance over this many seconds.
    Duration(f64),
    /// Cover the distance at this many units per second.
    Rate(f64),
}

/// One motion synthesis request: cover `total_distance` in discrete unit
/// actions of nominal magnitude `unit_size`, paced per `pacing`.
#[derive(Clone, Copy, Debug)]
pub struct MotionRequest {
    /// Total displacement to approximate, in pixels (or abstract units).
    pub total_distance: f64,
    /// Magnitude of one indivisible unit action (e.g. one wheel notch).
    pub unit_size: f64,
    pub pacing: Pacing,
}

impl MotionRequest {
    /// Request a natural-mode scroll over `total_duration` seconds.
    pub fn natural(total_distance: f64, total_duration: f64, unit_size: f64) -> Self {
        Self {
            total_distance,
            unit_size,
            pacing: Pacing::Duration(total_duration),
        }
    }

    /// Request a bulk-mode scroll at `target_rate` units per second.
    pub fn bulk(total_distance: f64, target_rate: f64, unit_size: f64) -> Self {
        Self {
            total_distance,
            unit_size,
            pacing: Pacing::Rate(target_rate),
        }
    }
}

/// Which way a unit action moves content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Content advances (scroll down).
    Forward,
    /// Content retreats (scroll up).
    Backward,
}

/// One discretized chunk of a plan: issue `unit_count` unit actions, then
/// block for `wait`. Produced, consumed, discarded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub unit_count: u32,
    pub wait: Duration,
}

/// Which discretization strategy produced a plan. Natural plans get pause
/// injection during execution; bulk plans never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanKind {
    Natural,
    Bulk,
}

/// Ordered step sequence covering one motion request.
#[derive(Clone, Debug)]
pub struct Plan {
    pub kind: PlanKind,
    pub steps: Vec<Step>,
}

impl Plan {
    /// Total unit actions the plan will issue.
    pub fn total_units(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.unit_count)).sum()
    }

    /// Sum of the plan's step waits (pause injection not included).
    pub fn total_wait(&self) -> Duration {
        self.steps.iter().map(|s| s.wait).sum()
    }
}

/// The two pause flavors the perturbation layer can inject after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseKind {
    /// Mid-scroll hesitation, well under two seconds.
    Short,
    /// The user looked away for a few seconds.
    Long,
}

/// An injected pause. Ephemeral, redrawn independently after every executed
/// natural step.
#[derive(Clone, Copy, Debug)]
pub struct PauseEvent {
    pub kind: PauseKind,
    pub duration: Duration,
}

/// What one plan execution actually performed.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecutionSummary {
    /// Unit actions issued before completion or abort.
    pub realized_units: u64,
    /// Time spent blocked (step waits plus injected pauses).
    pub realized_duration: Duration,
    pub steps_executed: usize,
    pub pauses_injected: usize,
}

/// A screen region selected by two corner points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// Normalize two arbitrary corner points into a region. The points may
    /// come in any order; width and height come out non-negative.
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            left: a.0.min(b.0),
            top: a.1.min(b.1),
            width: (b.0 - a.0).abs(),
            height: (b.1 - a.1).abs(),
        }
    }

    pub fn center(&self) -> (i32, i32) {
        (self.left + self.width / 2, self.top + self.height / 2)
    }
}

/// One Bernoulli-gated pause source: trigger with `chance`, then draw the
/// duration uniformly from `[min_secs, max_secs)`.
#[derive(Clone, Copy, Debug)]
pub struct PauseConfig {
    pub chance: f64,
    pub min_secs: f64,
    pub max_secs: f64,
}

/// Scheduler tuning knobs.
///
/// # Fidelity vs. throughput
/// The step-count range and jitter band only govern natural mode; the chunk
/// size and duration floor only govern bulk mode. Defaults come from
/// `constants` and suit wheel-style input with a 120 px notch.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Inclusive range the natural planner draws its step count from.
    pub min_steps: u32,
    pub max_steps: u32,
    /// Multiplier band applied to each natural step's base wait.
    pub wait_jitter_min: f64,
    pub wait_jitter_max: f64,
    pub short_pause: PauseConfig,
    pub long_pause: PauseConfig,
    /// Units per step in bulk mode.
    pub bulk_chunk_units: u32,
    /// Lower bound on a bulk plan's total duration, in seconds.
    pub bulk_min_duration_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_steps: constants::MIN_STEP_COUNT,
            max_steps: constants::MAX_STEP_COUNT,
            wait_jitter_min: constants::WAIT_JITTER_MIN,
            wait_jitter_max: constants::WAIT_JITTER_MAX,
            short_pause: PauseConfig {
                chance: constants::SHORT_PAUSE_CHANCE,
                min_secs: constants::SHORT_PAUSE_MIN_SECS,
                max_secs: constants::SHORT_PAUSE_MAX_SECS,
            },
            long_pause: PauseConfig {
                chance: constants::LONG_PAUSE_CHANCE,
                min_secs: constants::LONG_PAUSE_MIN_SECS,
                max_secs: constants::LONG_PAUSE_MAX_SECS,
            },
            bulk_chunk_units: constants::BULK_CHUNK_UNITS,
            bulk_min_duration_secs: constants::BULK_MIN_DURATION_SECS,
        }
    }
}

/// Coverage policy: which fraction of the region height one iteration
/// targets.
#[derive(Clone, Copy, Debug)]
pub struct CoverageConfig {
    /// Fraction used on a normal iteration.
    pub full: f64,
    /// Chance an iteration does a partial scroll instead.
    pub partial_chance: f64,
    /// Partial-scroll fraction is drawn uniformly from this range.
    pub partial_min: f64,
    pub partial_max: f64,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            full: constants::FULL_COVERAGE,
            partial_chance: constants::PARTIAL_COVERAGE_CHANCE,
            partial_min: constants::PARTIAL_COVERAGE_MIN,
            partial_max: constants::PARTIAL_COVERAGE_MAX,
        }
    }
}

/// Outer-loop behavior for a scrolling session.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    /// Distance scale factor applied on top of coverage x region height.
    pub scale: f64,
    /// Nominal magnitude of one unit action, in pixels.
    pub unit_size: f64,
    pub coverage: CoverageConfig,
    /// Per-iteration total duration is drawn from this range (natural mode).
    pub duration_min_secs: f64,
    pub duration_max_secs: f64,
    /// Idle wait between iterations is drawn from this range.
    pub idle_min_secs: f64,
    pub idle_max_secs: f64,
    /// When set, iterations use bulk pacing at this rate instead of a drawn
    /// duration.
    pub target_rate: Option<f64>,
    /// Stop after this many iterations; `None` runs until cancelled.
    pub iterations: Option<u64>,
    pub direction: Direction,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            unit_size: constants::DEFAULT_UNIT_SIZE_PX,
            coverage: CoverageConfig::default(),
            duration_min_secs: constants::SCROLL_DURATION_MIN_SECS,
            duration_max_secs: constants::SCROLL_DURATION_MAX_SECS,
            idle_min_secs: constants::IDLE_WAIT_MIN_SECS,
            idle_max_secs: constants::IDLE_WAIT_MAX_SECS,
            target_rate: None,
            iterations: None,
            direction: Direction::Forward,
        }
    }
}
