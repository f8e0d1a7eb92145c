//! Mock platform implementation for testing
//!
//! In-memory implementations of the platform traits so the control loop can
//! be exercised on a host without payload hardware.
//!
//! # Feature Gate
//!
//! Available during test builds and when the `mock` feature is enabled.
//!
//! # Example
//!
//! ```
//! use stratolink::platform::mock::{MockTimer, MockUart};
//! use stratolink::platform::traits::{TimerInterface, UartInterface};
//!
//! let mut uart = MockUart::new(Default::default());
//! uart.write(b"AT").unwrap();
//! assert_eq!(uart.tx_buffer(), b"AT");
//!
//! let mut timer = MockTimer::new();
//! timer.delay_ms(10).unwrap();
//! assert_eq!(timer.now_ms(), 10);
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod storage;
mod timer;
mod uart;

pub use gpio::MockGpio;
pub use storage::{MockFile, MockStorage};
pub use timer::MockTimer;
pub use uart::MockUart;
