//! Timer interface trait
//!
//! The monotonic clock behind every timing decision in the payload: sampling
//! tier boundaries, modem settle delays, retry spacing, indicator patterns.

use crate::platform::Result;

/// Timer interface trait
///
/// Platform implementations must provide a monotonic microsecond clock and
/// blocking delays. The control loop is single-threaded and cooperative, so
/// delays genuinely block; there is no other work to yield to.
pub trait TimerInterface {
    /// Block for `us` microseconds
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    /// Current monotonic time in microseconds since boot
    fn now_us(&self) -> u64;

    /// Current monotonic time in milliseconds since boot
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
