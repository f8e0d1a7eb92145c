//! Mock UART implementation for testing

use crate::platform::{
    traits::{UartConfig, UartInterface},
    Result,
};
use core::cell::RefCell;
use std::vec::Vec;

/// Mock UART implementation
///
/// Provides in-memory transmit and receive buffers so tests can verify the
/// modem dialogue without hardware.
///
/// # Example
///
/// ```
/// use stratolink::platform::mock::MockUart;
/// use stratolink::platform::traits::UartInterface;
///
/// let mut uart = MockUart::new(Default::default());
///
/// uart.write(b"AT+CMGF=1").unwrap();
/// assert_eq!(uart.tx_buffer(), b"AT+CMGF=1");
///
/// uart.inject_rx_data(b"OK\r\n");
/// assert!(uart.available());
/// ```
#[derive(Debug)]
pub struct MockUart {
    config: UartConfig,
    tx_buffer: RefCell<Vec<u8>>,
    rx_buffer: RefCell<Vec<u8>>,
}

impl MockUart {
    /// Create a new mock UART
    pub fn new(config: UartConfig) -> Self {
        Self {
            config,
            tx_buffer: RefCell::new(Vec::new()),
            rx_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Get transmitted data (for test verification)
    pub fn tx_buffer(&self) -> Vec<u8> {
        self.tx_buffer.borrow().clone()
    }

    /// Get transmitted data as a lossy string (for test verification)
    pub fn tx_string(&self) -> std::string::String {
        std::string::String::from_utf8_lossy(&self.tx_buffer.borrow()).into_owned()
    }

    /// Clear transmit buffer
    pub fn clear_tx_buffer(&mut self) {
        self.tx_buffer.borrow_mut().clear();
    }

    /// Inject receive data (for test setup)
    pub fn inject_rx_data(&mut self, data: &[u8]) {
        self.rx_buffer.borrow_mut().extend_from_slice(data);
    }

    /// Get current baud rate
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

impl UartInterface for MockUart {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.tx_buffer.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut rx = self.rx_buffer.borrow_mut();
        let to_read = core::cmp::min(buffer.len(), rx.len());

        buffer[..to_read].copy_from_slice(&rx[..to_read]);
        rx.drain(..to_read);

        Ok(to_read)
    }

    fn available(&self) -> bool {
        !self.rx_buffer.borrow().is_empty()
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<()> {
        self.config.baud_rate = baud;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Mock implementation - nothing to flush
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_uart_write() {
        let mut uart = MockUart::new(UartConfig::default());
        let written = uart.write(b"ATE0\r").unwrap();
        assert_eq!(written, 5);
        assert_eq!(uart.tx_buffer(), b"ATE0\r");
    }

    #[test]
    fn test_mock_uart_read_drains() {
        let mut uart = MockUart::new(UartConfig::default());
        uart.inject_rx_data(b"+CMT: data");

        let mut buffer = [0u8; 5];
        let read = uart.read(&mut buffer).unwrap();
        assert_eq!(read, 5);
        assert_eq!(&buffer, b"+CMT:");

        let mut rest = [0u8; 16];
        let read2 = uart.read(&mut rest).unwrap();
        assert_eq!(&rest[..read2], b" data");
        assert!(!uart.available());
    }

    #[test]
    fn test_mock_uart_available() {
        let mut uart = MockUart::new(UartConfig::default());
        assert!(!uart.available());

        uart.inject_rx_data(b"X");
        assert!(uart.available());
    }
}
