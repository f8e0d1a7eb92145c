//! Telemetry sampling subsystem
//!
//! The nested multi-rate scheduler, per-family failure bookkeeping, and the
//! append-per-record stream log. One scheduler instance owns all mutable
//! sampling state (counters, last-known position); everything else is
//! borrowed per call, which keeps the single-writer model explicit.

pub mod failures;
pub mod log;
pub mod scheduler;

pub use failures::{FailureTracker, ReadOutcome};
pub use log::{TelemetryLog, AUX_FIELDS, DOF_FIELDS, POSITION_FIELDS};
pub use scheduler::TelemetryScheduler;

use crate::platform::{GpioInterface, Result, TimerInterface};

/// Start-trigger poll spacing, ms
const START_POLL_MS: u32 = 50;

/// Block until the start-trigger input goes high
///
/// The payload sits idle on the pad until the crew pulls the start trigger;
/// sampling and the command channel both begin after this returns.
pub fn wait_for_start<G: GpioInterface, T: TimerInterface>(
    trigger: &G,
    timer: &mut T,
) -> Result<()> {
    while !trigger.read() {
        timer.delay_ms(START_POLL_MS)?;
    }
    Ok(())
}
