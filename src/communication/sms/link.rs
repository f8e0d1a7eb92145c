//! AT-command transport over a UART modem
//!
//! Line-oriented AT dialect: a fixed configuration sequence at boot, text
//! sends framed as `AT+CMGS="<number>"` + body + 0x1A, and an inbound flush
//! after every send. The modem gives no structured delivery acknowledgement;
//! success is assumed after the configured settle delay.

use heapless::Vec;

use crate::platform::{
    error::UartError, PlatformError, Result, TimerInterface, UartInterface,
};

/// Maximum raw inbound frame size, bytes
pub const FRAME_CAP: usize = 256;

/// Boot-time modem configuration: echo off, flow control off, verbose
/// result codes off, text message format
const CONFIG_SEQUENCE: [&str; 4] = ["ATE0", "AT&K0", "ATV0", "AT+CMGF=1"];

/// Message body terminator (Ctrl-Z)
const BODY_TERMINATOR: u8 = 0x1A;

/// Spacing between drain reads while a frame trickles in, ms
const INTER_READ_MS: u32 = 10;

/// SMS transport over a UART
#[derive(Debug)]
pub struct SmsLink<U> {
    uart: U,
    settle_ms: u32,
}

impl<U: UartInterface> SmsLink<U> {
    /// Wrap a modem UART with the given settle delay
    pub fn new(uart: U, settle_ms: u32) -> Self {
        Self { uart, settle_ms }
    }

    /// Issue the boot configuration sequence, then flush stale input
    pub fn configure<T: TimerInterface>(&mut self, timer: &mut T) -> Result<()> {
        for command in CONFIG_SEQUENCE {
            self.send_command(timer, command)?;
        }
        self.flush_input(timer)
    }

    /// Send one text message to `number`
    ///
    /// The inbound buffer is flushed afterwards to discard modem echo and
    /// status lines.
    pub fn send_text<T: TimerInterface>(
        &mut self,
        timer: &mut T,
        number: &str,
        body: &str,
    ) -> Result<()> {
        self.uart.write(b"AT+CMGS=\"")?;
        self.uart.write(number.as_bytes())?;
        self.uart.write(b"\"\r")?;
        timer.delay_ms(self.settle_ms)?;

        self.uart.write(body.as_bytes())?;
        self.uart.write(&[BODY_TERMINATOR])?;
        timer.delay_ms(self.settle_ms)?;

        self.flush_input(timer)
    }

    /// Whether inbound data is waiting
    pub fn available(&self) -> bool {
        self.uart.available()
    }

    /// Discard all pending inbound data
    pub fn flush_input<T: TimerInterface>(&mut self, timer: &mut T) -> Result<()> {
        let mut sink = [0u8; 32];
        while self.uart.available() {
            self.uart.read(&mut sink)?;
            timer.delay_ms(INTER_READ_MS)?;
        }
        Ok(())
    }

    /// Drain one raw inbound frame
    ///
    /// Reads until the receive buffer stays empty, pausing between reads so
    /// a frame still arriving at line rate is captured whole.
    pub fn read_frame<T: TimerInterface>(&mut self, timer: &mut T) -> Result<Vec<u8, FRAME_CAP>> {
        let mut frame: Vec<u8, FRAME_CAP> = Vec::new();
        let mut chunk = [0u8; 32];
        while self.uart.available() {
            let n = self.uart.read(&mut chunk)?;
            if frame.extend_from_slice(&chunk[..n]).is_err() {
                return Err(PlatformError::Uart(UartError::Overrun));
            }
            timer.delay_ms(INTER_READ_MS)?;
        }
        Ok(frame)
    }

    /// Access the underlying UART (for test verification)
    pub fn uart(&mut self) -> &mut U {
        &mut self.uart
    }

    fn send_command<T: TimerInterface>(&mut self, timer: &mut T, command: &str) -> Result<()> {
        self.uart.write(command.as_bytes())?;
        self.uart.write(b"\r")?;
        timer.delay_ms(self.settle_ms)
    }
}
