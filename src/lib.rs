#![cfg_attr(not(test), no_std)]

//! stratolink - Flight data acquisition controller for a high-altitude balloon payload
//!
//! This library implements the payload-side control software for a tethered
//! high-altitude balloon: multi-rate telemetry sampling across six sensor
//! families, durable append-per-record CSV logging, and a remote command
//! channel over an SMS modem.
//!
//! Hardware access is isolated behind capability traits in [`platform`] and
//! [`devices`]; the control logic is platform-independent and is exercised in
//! host tests through the mock implementations (`mock` feature).

#[cfg(any(test, feature = "mock"))]
extern crate std;

// Platform abstraction layer (UART, GPIO, timer, record storage)
pub mod platform;

// Sensor capability traits and indicator driver
pub mod devices;

// Core infrastructure (logging macros, configuration, fatal halt)
pub mod core;

// Telemetry sampling: scheduler, failure tracking, record log
pub mod telemetry;

// SMS command channel (AT transport, frame parser, protocol state machine)
pub mod communication;
