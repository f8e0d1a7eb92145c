//! UART interface trait
//!
//! The payload uses a single UART for the SMS modem. The command channel
//! only needs blocking byte I/O plus an availability probe for polling.

use crate::platform::Result;

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baud_rate: 115_200 }
    }
}

/// UART interface trait
///
/// Platform implementations must provide this interface for serial
/// communication with the modem.
///
/// # Safety Invariants
///
/// - UART peripheral must be initialized before use
/// - Only one owner per UART instance
/// - No concurrent access from multiple contexts
pub trait UartInterface {
    /// Write bytes to the UART
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart(UartError::WriteFailed)` if the transmit
    /// path fails.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read available bytes into `buffer`
    ///
    /// Returns the number of bytes read; zero when the receive buffer is
    /// empty. Never blocks waiting for more data.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Check whether received data is waiting
    fn available(&self) -> bool;

    /// Change the baud rate
    fn set_baud_rate(&mut self, baud: u32) -> Result<()>;

    /// Block until all pending transmit data has left the peripheral
    fn flush(&mut self) -> Result<()>;
}
