//! Per-sensor failure bookkeeping
//!
//! Pure counters: incremented on failure, never reset in flight, never used
//! to gate further sampling. Exposed for observability only; the corrective
//! policies (Barometer2 retry, Position fallback) live in the scheduler.

use crate::devices::SensorFamily;

/// Outcome of one sensor read, as seen by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadOutcome {
    /// Read produced a validated reading
    Success,
    /// Read failed or the reading was out of range
    Failure,
}

/// Monotonic per-family failure counters
#[derive(Debug, Default)]
pub struct FailureTracker {
    counts: [u32; SensorFamily::COUNT],
}

impl FailureTracker {
    /// Create a tracker with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one read outcome for `family`
    ///
    /// Failures increment that family's counter; successes leave every
    /// counter unchanged.
    pub fn record(&mut self, family: SensorFamily, outcome: ReadOutcome) {
        if outcome == ReadOutcome::Failure {
            self.counts[family.index()] = self.counts[family.index()].saturating_add(1);
        }
    }

    /// Failure count for `family`
    pub fn failures(&self, family: SensorFamily) -> u32 {
        self.counts[family.index()]
    }

    /// Total failures across all families
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}
