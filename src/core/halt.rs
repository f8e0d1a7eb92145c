//! Fatal halt state
//!
//! Unrecoverable conditions (missing required sensor, storage failure,
//! handshake violation) end in an explicit terminal state that signals the
//! failure on the status indicator forever. There is no restart path other
//! than an external power cycle; once airborne the payload has no remote
//! recovery, so stopping visibly beats flying blind.

use crate::devices::{SensorFamily, StatusIndicator};
use crate::platform::{GpioInterface, PlatformError, Result, TimerInterface};

/// Blink burst on-time, ms
const BURST_ON_MS: u32 = 150;

/// Blink burst off-time, ms
const BURST_OFF_MS: u32 = 150;

/// Pause between bursts, ms
const BURST_PAUSE_MS: u32 = 1_000;

/// Unrecoverable failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FatalError {
    /// A required sensor did not answer at init
    SensorMissing(SensorFamily),
    /// Record storage could not be opened or written
    Storage(PlatformError),
    /// The SMS transport failed
    Link(PlatformError),
    /// Startup handshake reply was not the expected literal
    HandshakeViolation,
    /// Other platform failure (timer, indicator pin)
    Platform(PlatformError),
}

/// Terminal halt state
///
/// Constructed from a [`FatalError`]; [`FatalHalt::run`] never returns.
/// [`FatalHalt::signal_cycle`] performs one burst of the repeating pattern
/// and exists so the pattern is unit testable.
#[derive(Debug)]
pub struct FatalHalt {
    error: FatalError,
}

impl FatalHalt {
    /// Enter the halt state for `error`
    pub fn new(error: FatalError) -> Self {
        Self { error }
    }

    /// The failure that caused the halt
    pub fn error(&self) -> FatalError {
        self.error
    }

    /// Number of blinks per burst, keyed by failure kind
    pub fn burst_len(&self) -> u32 {
        match self.error {
            FatalError::SensorMissing(_) => 2,
            FatalError::Storage(_) => 3,
            FatalError::Link(_) => 4,
            FatalError::HandshakeViolation => 5,
            FatalError::Platform(_) => 6,
        }
    }

    /// Emit one blink burst followed by the inter-burst pause
    pub fn signal_cycle<G: GpioInterface, T: TimerInterface>(
        &self,
        indicator: &mut StatusIndicator<G>,
        timer: &mut T,
    ) -> Result<()> {
        indicator.pulse(timer, self.burst_len(), BURST_ON_MS, BURST_OFF_MS)?;
        timer.delay_ms(BURST_PAUSE_MS)
    }

    /// Signal the failure forever
    ///
    /// Indicator errors are ignored here: there is nothing left to degrade
    /// to once the halt state is reached.
    pub fn run<G: GpioInterface, T: TimerInterface>(
        self,
        indicator: &mut StatusIndicator<G>,
        timer: &mut T,
    ) -> ! {
        crate::log_error!("fatal halt, burst pattern {}", self.burst_len());
        loop {
            let _ = self.signal_cycle(indicator, timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockGpio, MockTimer};
    use crate::platform::error::StorageError;

    #[test]
    fn test_burst_len_distinguishes_causes() {
        let storage = FatalHalt::new(FatalError::Storage(PlatformError::Storage(
            StorageError::OpenFailed,
        )));
        let handshake = FatalHalt::new(FatalError::HandshakeViolation);
        assert_ne!(storage.burst_len(), handshake.burst_len());
    }

    #[test]
    fn test_signal_cycle_pattern() {
        let halt = FatalHalt::new(FatalError::HandshakeViolation);
        let mut led = StatusIndicator::new(MockGpio::new_output());
        let mut timer = MockTimer::new();

        halt.signal_cycle(&mut led, &mut timer).unwrap();

        // 5 blinks = 10 transitions, ending low, then the pause
        assert_eq!(led.pin().transitions(), 10);
        assert!(!led.is_lit());
        assert_eq!(timer.now_ms(), (5 * (150 + 150) + 1_000) as u64);
    }

    #[test]
    fn test_error_is_preserved() {
        let halt = FatalHalt::new(FatalError::SensorMissing(SensorFamily::InertialBaro));
        assert_eq!(
            halt.error(),
            FatalError::SensorMissing(SensorFamily::InertialBaro)
        );
    }
}
