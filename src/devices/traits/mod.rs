//! Sensor capability traits
//!
//! Each sensor family exposes `init()` (hardware probe, fatal if a required
//! sensor is absent) and `read()` returning a typed reading. Implementations
//! perform hardware I/O with no retry of their own; retry and fallback
//! policy belongs to the scheduler.

pub mod baro;
pub mod environment;
pub mod gas;
pub mod gps;
pub mod imu;
pub mod light;

pub use baro::{BaroReading, BaroSensor};
pub use environment::{EnvReading, HumidityTempSensor};
pub use gas::{GasArraySensor, GasReading};
pub use gps::{PositionReading, PositionSensor};
pub use imu::{DofReading, DofSensor};
pub use light::{LightReading, LightSensor};

/// Sensor read failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not respond on its bus
    NotDetected,
    /// Bus transaction failed mid-read
    Bus,
    /// Reading fell outside the plausible range for the family
    OutOfRange,
    /// No position fix of sufficient quality
    NoFix,
}

/// Sensor family identifier
///
/// Indexes failure counters and names log streams. The order here is also
/// the fixed read order within an Auxiliary-tier tick (Barometer2, GasArray,
/// HumidityTemp, Light).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorFamily {
    /// 9-DOF inertial unit with integrated barometer
    InertialBaro,
    /// Secondary barometer
    Barometer2,
    /// Gas concentration array
    GasArray,
    /// Humidity/temperature sensor
    HumidityTemp,
    /// Light sensor
    Light,
    /// GPS receiver
    Position,
}

impl SensorFamily {
    /// Number of sensor families
    pub const COUNT: usize = 6;

    /// Stable index for per-family bookkeeping
    pub const fn index(self) -> usize {
        match self {
            SensorFamily::InertialBaro => 0,
            SensorFamily::Barometer2 => 1,
            SensorFamily::GasArray => 2,
            SensorFamily::HumidityTemp => 3,
            SensorFamily::Light => 4,
            SensorFamily::Position => 5,
        }
    }

    /// Human-readable family name for diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            SensorFamily::InertialBaro => "inertial",
            SensorFamily::Barometer2 => "baro2",
            SensorFamily::GasArray => "gas",
            SensorFamily::HumidityTemp => "humidity",
            SensorFamily::Light => "light",
            SensorFamily::Position => "position",
        }
    }
}
