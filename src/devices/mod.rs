//! Sensor capability layer
//!
//! One trait per sensor family, each returning a typed reading or a
//! [`SensorError`]. Register-level driver bring-up lives behind these traits
//! in platform-specific crates; the scheduler only sees capabilities.

pub mod indicator;
pub mod traits;

// Scripted mock sensors for host testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use indicator::StatusIndicator;
pub use traits::{
    BaroReading, BaroSensor, DofReading, DofSensor, EnvReading, GasArraySensor, GasReading,
    HumidityTempSensor, LightReading, LightSensor, PositionReading, PositionSensor, SensorError,
    SensorFamily,
};

/// The full sensor complement of the payload
///
/// Owned by the control loop and handed to the scheduler by mutable
/// reference; each field is one capability implementation.
#[derive(Debug)]
pub struct SensorSuite<D, B, G, H, L, P> {
    /// Inertial + primary barometer (DOF stream)
    pub dof: D,
    /// Secondary barometer (Aux stream)
    pub baro: B,
    /// Gas concentration array (Aux stream)
    pub gas: G,
    /// Humidity/temperature sensor (Aux stream)
    pub env: H,
    /// Light sensor (Aux stream)
    pub light: L,
    /// GPS receiver (Position stream)
    pub gps: P,
}
