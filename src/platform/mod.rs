//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the payload electronics.
//! All platform-specific code must stay behind these traits; the telemetry
//! and command-channel logic never touches a peripheral register directly.

pub mod error;
pub mod traits;

// Mock implementations for host testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{
    FileHandle, GpioInterface, GpioMode, StorageInterface, TimerInterface, UartConfig,
    UartInterface,
};
