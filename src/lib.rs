//! Humanized scroll-motion synthesis.
//!
//! Turns `(total distance, pacing, unit size)` into a time-ordered plan of
//! `(unit count, wait)` steps and executes it against an abstract input
//! driver. A half-cosine velocity envelope shapes the natural mode (many
//! small, irregular steps with stochastic rounding, wait jitter, and
//! injected pauses); the bulk mode trades that fidelity for throughput
//! (constant-size bursts at a uniform wait sized to a target rate). Both
//! strategies share one plan shape so execution is mode-agnostic.
//!
//! # Example
//!
//! ```ignore
//! use rand::{rngs::StdRng, SeedableRng};
//! use scroll_motion_engine::driver::{CancelToken, ConsoleDriver};
//! use scroll_motion_engine::{run_plan, Direction, EngineConfig, MotionRequest};
//!
//! let request = MotionRequest::natural(1140.0, 1.8, 120.0);
//! let mut driver = ConsoleDriver::new();
//! let mut rng = StdRng::seed_from_u64(7);
//! let summary = run_plan(
//!     &request,
//!     Direction::Forward,
//!     &mut driver,
//!     &EngineConfig::default(),
//!     &CancelToken::new(),
//!     &mut rng,
//! )?;
//! ```

pub mod constants;
pub mod coverage;
pub mod driver;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod humanize;
pub mod planner;
pub mod session;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::EngineError;
pub use executor::{execute_plan, run_plan};
pub use types::{
    Direction, EngineConfig, ExecutionSummary, MotionRequest, Pacing, PauseEvent, PauseKind, Plan,
    PlanKind, Region, SessionConfig, Step,
};
