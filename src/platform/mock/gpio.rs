//! Mock GPIO implementation for testing

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};

/// Mock GPIO implementation
///
/// Tracks pin state, mode, and the number of level transitions so tests can
/// verify indicator patterns.
#[derive(Debug)]
pub struct MockGpio {
    state: bool,
    mode: GpioMode,
    transitions: u32,
}

impl MockGpio {
    /// Create a new mock GPIO in output mode
    pub fn new_output() -> Self {
        Self {
            state: false,
            mode: GpioMode::OutputPushPull,
            transitions: 0,
        }
    }

    /// Create a new mock GPIO in input mode
    pub fn new_input() -> Self {
        Self {
            state: false,
            mode: GpioMode::Input,
            transitions: 0,
        }
    }

    /// Set the input state (for simulating input pin reads)
    pub fn set_input_state(&mut self, high: bool) {
        self.state = high;
    }

    /// Number of level transitions observed (for verifying blink patterns)
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    fn set_state(&mut self, high: bool) -> Result<()> {
        match self.mode {
            GpioMode::OutputPushPull => {
                if self.state != high {
                    self.transitions += 1;
                }
                self.state = high;
                Ok(())
            }
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        self.set_state(true)
    }

    fn set_low(&mut self) -> Result<()> {
        self.set_state(false)
    }

    fn toggle(&mut self) -> Result<()> {
        let next = !self.state;
        self.set_state(next)
    }

    fn read(&self) -> bool {
        self.state
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode = mode;
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_gpio_output() {
        let mut gpio = MockGpio::new_output();
        assert!(!gpio.read());

        gpio.set_high().unwrap();
        assert!(gpio.read());

        gpio.set_low().unwrap();
        assert!(!gpio.read());
        assert_eq!(gpio.transitions(), 2);
    }

    #[test]
    fn test_mock_gpio_input_rejects_writes() {
        let mut gpio = MockGpio::new_input();
        assert!(gpio.set_high().is_err());
        assert!(gpio.toggle().is_err());

        gpio.set_input_state(true);
        assert!(gpio.read());
    }

    #[test]
    fn test_mock_gpio_transitions_ignore_no_ops() {
        let mut gpio = MockGpio::new_output();
        gpio.set_low().unwrap();
        gpio.set_low().unwrap();
        assert_eq!(gpio.transitions(), 0);

        gpio.toggle().unwrap();
        gpio.toggle().unwrap();
        assert_eq!(gpio.transitions(), 2);
    }
}
