//! Humidity/temperature sensor trait (Aux stream)

use super::SensorError;

/// Plausible temperature range, degrees C
pub const TEMP_RANGE: (f32, f32) = (-100.0, 100.0);

/// Plausible relative humidity range, percent
pub const HUMIDITY_RANGE: (f32, f32) = (0.0, 100.0);

/// One sample from the humidity/temperature sensor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EnvReading {
    /// Temperature, degrees C
    pub temperature: f32,
    /// Relative humidity, percent
    pub humidity: f32,
}

impl EnvReading {
    /// All-zero reading, logged in place of a failed sample
    pub const fn zeroed() -> Self {
        Self {
            temperature: 0.0,
            humidity: 0.0,
        }
    }

    /// Range validation for this family
    ///
    /// Both bounds are checked conjunctively; a reading outside either
    /// range is treated as a read failure by the scheduler.
    pub fn in_range(&self) -> bool {
        let (t_lo, t_hi) = TEMP_RANGE;
        let (h_lo, h_hi) = HUMIDITY_RANGE;
        t_lo <= self.temperature
            && self.temperature <= t_hi
            && h_lo <= self.humidity
            && self.humidity <= h_hi
    }
}

/// Humidity/temperature capability
pub trait HumidityTempSensor {
    /// Probe the sensor
    fn init(&mut self) -> Result<(), SensorError>;

    /// Take one sample
    fn read(&mut self) -> Result<EnvReading, SensorError>;
}
