//! Mock Timer implementation for testing

use crate::platform::{traits::TimerInterface, Result};

/// Mock Timer implementation
///
/// Simulated time: delays advance the clock instantly, so nested tier
/// timing can be tested without real waiting.
#[derive(Debug)]
pub struct MockTimer {
    now_us: u64,
}

impl MockTimer {
    /// Create a new mock timer at t=0
    pub fn new() -> Self {
        Self { now_us: 0 }
    }

    /// Advance simulated time without a delay call (for test setup)
    pub fn advance_ms(&mut self, ms: u64) {
        self.now_us = self.now_us.wrapping_add(ms * 1000);
    }
}

impl Default for MockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.now_us = self.now_us.wrapping_add(us as u64);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}
