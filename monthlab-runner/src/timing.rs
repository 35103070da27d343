//! Stage timing.
//!
//! A `StageTimer` logs its elapsed wall time at debug level when dropped, so
//! a pipeline stage is timed by holding one for the stage's scope:
//!
//! ```
//! use monthlab_runner::timing::StageTimer;
//!
//! fn load() {
//!     let _timer = StageTimer::new("load");
//!     // Work...
//! }
//! ```
//!
//! Enable the output with `RUST_LOG=monthlab_runner=debug`.

use std::time::{Duration, Instant};

use tracing::debug;

pub struct StageTimer {
    stage: &'static str,
    start: Instant,
}

impl StageTimer {
    #[inline]
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            start: Instant::now(),
        }
    }

    /// Elapsed time without dropping the timer.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        debug!(
            stage = self.stage,
            elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0,
            "stage finished"
        );
    }
}
