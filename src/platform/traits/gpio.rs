//! GPIO interface trait
//!
//! Indicator outputs (status LED) and the start-trigger input go through
//! this interface.

use crate::platform::Result;

/// GPIO pin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioMode {
    /// Input mode (high impedance)
    Input,
    /// Input mode with pull-up resistor
    InputPullUp,
    /// Output mode (push-pull)
    OutputPushPull,
}

/// GPIO interface trait
///
/// # Safety Invariants
///
/// - Pin must be initialized before use
/// - Only one owner per pin instance
/// - No concurrent access to the same pin from multiple contexts
pub trait GpioInterface {
    /// Set pin high (logic level 1)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin is
    /// not configured as an output.
    fn set_high(&mut self) -> Result<()>;

    /// Set pin low (logic level 0)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin is
    /// not configured as an output.
    fn set_low(&mut self) -> Result<()>;

    /// Toggle pin state
    fn toggle(&mut self) -> Result<()>;

    /// Read pin state (`true` = high)
    fn read(&self) -> bool;

    /// Set pin mode
    fn set_mode(&mut self, mode: GpioMode) -> Result<()>;

    /// Get current pin mode
    fn mode(&self) -> GpioMode;
}
