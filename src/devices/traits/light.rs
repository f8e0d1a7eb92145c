//! Light sensor trait (Aux stream)

use super::SensorError;

/// One sample from the light sensor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightReading {
    /// Illuminance, lux
    pub level: f32,
}

impl LightReading {
    /// All-zero reading, logged in place of a failed sample
    pub const fn zeroed() -> Self {
        Self { level: 0.0 }
    }
}

/// Light sensor capability
pub trait LightSensor {
    /// Probe the sensor
    fn init(&mut self) -> Result<(), SensorError>;

    /// Take one sample
    fn read(&mut self) -> Result<LightReading, SensorError>;
}
