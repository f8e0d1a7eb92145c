//! Inertial/barometer sensor trait (DOF stream)

use super::SensorError;

/// One sample from the 9-DOF inertial unit and its integrated barometer
///
/// Field order matches the DOF log record (15 fields).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DofReading {
    /// Acceleration, m/s^2 (x, y, z)
    pub accel: [f32; 3],
    /// Angular rate, deg/s (x, y, z)
    pub gyro: [f32; 3],
    /// Magnetic field, uT (x, y, z)
    pub mag: [f32; 3],
    /// Roll angle, degrees
    pub roll: f32,
    /// Pitch angle, degrees
    pub pitch: f32,
    /// Heading, degrees
    pub heading: f32,
    /// Barometric pressure, hPa
    pub pressure: f32,
    /// Temperature, degrees C
    pub temperature: f32,
    /// Pressure altitude, m
    pub altitude: f32,
}

impl DofReading {
    /// All-zero reading, logged in place of a failed sample
    pub const fn zeroed() -> Self {
        Self {
            accel: [0.0; 3],
            gyro: [0.0; 3],
            mag: [0.0; 3],
            roll: 0.0,
            pitch: 0.0,
            heading: 0.0,
            pressure: 0.0,
            temperature: 0.0,
            altitude: 0.0,
        }
    }
}

/// Inertial/barometer capability
pub trait DofSensor {
    /// Probe the sensor
    ///
    /// # Errors
    ///
    /// Returns `SensorError::NotDetected` if the unit does not answer.
    /// This sensor is required; an init failure is fatal to the mission.
    fn init(&mut self) -> Result<(), SensorError>;

    /// Take one sample
    fn read(&mut self) -> Result<DofReading, SensorError>;
}
