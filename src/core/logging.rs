//! Logging abstraction
//!
//! Unified diagnostic logging macros across targets:
//! - Embedded (`defmt` feature): routed through defmt
//! - Host tests and mock builds: `println!`
//! - Otherwise: no-op
//!
//! These macros are for diagnostics only; telemetry records go through
//! `telemetry::log`, never through here (except in debug-echo mode, which
//! deliberately routes records to the console instead of storage).

/// Log at debug level
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { defmt::debug!($($arg)*) };
}

/// Log at info level
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { defmt::info!($($arg)*) };
}

/// Log at warn level
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { defmt::warn!($($arg)*) };
}

/// Log at error level
#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { defmt::error!($($arg)*) };
}

/// Log at debug level
#[cfg(all(not(feature = "defmt"), any(test, feature = "mock")))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { std::println!("[DEBUG] {}", std::format!($($arg)*)) };
}

/// Log at info level
#[cfg(all(not(feature = "defmt"), any(test, feature = "mock")))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { std::println!("[INFO ] {}", std::format!($($arg)*)) };
}

/// Log at warn level
#[cfg(all(not(feature = "defmt"), any(test, feature = "mock")))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { std::println!("[WARN ] {}", std::format!($($arg)*)) };
}

/// Log at error level
#[cfg(all(not(feature = "defmt"), any(test, feature = "mock")))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { std::println!("[ERROR] {}", std::format!($($arg)*)) };
}

/// Log at debug level (no-op build)
#[cfg(all(not(feature = "defmt"), not(any(test, feature = "mock"))))]
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{}};
}

/// Log at info level (no-op build)
#[cfg(all(not(feature = "defmt"), not(any(test, feature = "mock"))))]
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{}};
}

/// Log at warn level (no-op build)
#[cfg(all(not(feature = "defmt"), not(any(test, feature = "mock"))))]
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{}};
}

/// Log at error level (no-op build)
#[cfg(all(not(feature = "defmt"), not(any(test, feature = "mock"))))]
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{}};
}
