//! Core infrastructure
//!
//! Logging macros, the tunable payload configuration, and the fatal halt
//! state shared by every subsystem.

pub mod config;
pub mod halt;
pub mod logging;

pub use config::PayloadConfig;
pub use halt::{FatalError, FatalHalt};
