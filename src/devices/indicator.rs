//! Status indicator driver
//!
//! Drives the payload status LED: command acknowledgment pulses, the
//! handshake-wait blink, and the fatal-halt burst pattern.

use crate::platform::{GpioInterface, Result, TimerInterface};

/// Pulse on-time for command acknowledgment, ms
const PULSE_ON_MS: u32 = 200;

/// Pulse off-time for command acknowledgment, ms
const PULSE_OFF_MS: u32 = 200;

/// Status LED driver over a GPIO output
#[derive(Debug)]
pub struct StatusIndicator<G> {
    pin: G,
}

impl<G: GpioInterface> StatusIndicator<G> {
    /// Wrap a GPIO output as the status indicator
    pub fn new(pin: G) -> Self {
        Self { pin }
    }

    /// Emit `count` on/off pulses with the given timing
    pub fn pulse<T: TimerInterface>(
        &mut self,
        timer: &mut T,
        count: u32,
        on_ms: u32,
        off_ms: u32,
    ) -> Result<()> {
        for _ in 0..count {
            self.pin.set_high()?;
            timer.delay_ms(on_ms)?;
            self.pin.set_low()?;
            timer.delay_ms(off_ms)?;
        }
        Ok(())
    }

    /// Acknowledgment pattern for the remote LED command
    pub fn command_pulse<T: TimerInterface>(&mut self, timer: &mut T) -> Result<()> {
        self.pulse(timer, 3, PULSE_ON_MS, PULSE_OFF_MS)
    }

    /// One step of the handshake-wait blink (called per poll iteration)
    pub fn blink_step(&mut self) -> Result<()> {
        self.pin.toggle()
    }

    /// Force the indicator off
    pub fn off(&mut self) -> Result<()> {
        self.pin.set_low()
    }

    /// Current LED state (for test verification)
    pub fn is_lit(&self) -> bool {
        self.pin.read()
    }

    /// Access the underlying pin (for test verification)
    pub fn pin(&self) -> &G {
        &self.pin
    }
}
