//! The interaction seam: everything that touches the pointer, the input
//! device, or the clock goes through [`InputDriver`].

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{info, trace};
use thiserror::Error;

use crate::types::Direction;

/// Failures the interaction layer can raise.
#[derive(Debug, Error)]
pub enum DriverError {
    /// A global failsafe tripped (for example the pointer reached a guarded
    /// screen corner). The executor stops issuing actions immediately and
    /// surfaces the abort to its caller.
    #[error("abort signal raised by the input layer")]
    Abort,

    /// The underlying primitive failed. Never retried.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Cooperative cancellation flag.
///
/// Cloned freely; all clones observe the same flag. The executor checks it
/// at every step boundary, so cancellation stops the stream before the next
/// step's burst, not mid-burst.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The primitives the engine drives.
///
/// All methods block the single thread of control. `wait` is routed through
/// the driver too, so a driver can virtualize time instead of sleeping;
/// the engine performs every suspension through it.
pub trait InputDriver {
    /// Issue one discrete unit action (e.g. one wheel notch).
    fn emit_unit_action(&mut self, direction: Direction) -> Result<(), DriverError>;

    /// Best-effort smooth pointer relocation over `duration`.
    fn move_pointer_to(&mut self, x: i32, y: i32, duration: Duration) -> Result<(), DriverError>;

    /// Current pointer coordinates.
    fn pointer_position(&mut self) -> Result<(i32, i32), DriverError>;

    /// Block for `duration`.
    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Driver that narrates actions to the log and tracks a virtual pointer and
/// scroll offset instead of touching an input device.
///
/// This is the backend the bundled binary runs on; real injection backends
/// implement [`InputDriver`] against their platform API.
#[derive(Debug, Default)]
pub struct ConsoleDriver {
    pointer: (i32, i32),
    offset_units: i64,
}

impl ConsoleDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net unit actions issued so far (forward positive).
    pub fn offset_units(&self) -> i64 {
        self.offset_units
    }
}

impl InputDriver for ConsoleDriver {
    fn emit_unit_action(&mut self, direction: Direction) -> Result<(), DriverError> {
        self.offset_units += match direction {
            Direction::Forward => 1,
            Direction::Backward => -1,
        };
        trace!("unit action {direction:?}, offset now {} units", self.offset_units);
        Ok(())
    }

    fn move_pointer_to(&mut self, x: i32, y: i32, duration: Duration) -> Result<(), DriverError> {
        info!("pointer glide to ({x}, {y}) over {:.2}s", duration.as_secs_f64());
        self.pointer = (x, y);
        self.wait(duration);
        Ok(())
    }

    fn pointer_position(&mut self) -> Result<(i32, i32), DriverError> {
        Ok(self.pointer)
    }
}
