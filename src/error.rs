use thiserror::Error;

use crate::types::ExecutionSummary;

/// Everything the engine can fail with.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request or configuration was rejected before any unit action was
    /// issued. Recoverable: fix the inputs and retry.
    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    /// External cancellation observed during execution. Carries what was
    /// realized up to the abort so the invocation loop can report it. Fatal
    /// to the session; never recovered inside the engine.
    #[error(
        "execution aborted after {} unit actions over {:.2}s",
        .0.realized_units,
        .0.realized_duration.as_secs_f64()
    )]
    Aborted(ExecutionSummary),

    /// The interaction layer failed to issue an action or move the pointer.
    /// Propagated immediately; the engine never retries.
    #[error("input driver failure: {0}")]
    Driver(#[from] std::io::Error),
}
