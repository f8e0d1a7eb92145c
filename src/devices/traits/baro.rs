//! Secondary barometer trait (Aux stream)

use super::SensorError;

/// One sample from the secondary barometer
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaroReading {
    /// Barometric pressure, hPa
    pub pressure: f32,
    /// Temperature, degrees C
    pub temperature: f32,
}

impl BaroReading {
    /// Degraded all-zero reading, logged after retry exhaustion
    pub const fn zeroed() -> Self {
        Self {
            pressure: 0.0,
            temperature: 0.0,
        }
    }
}

/// Secondary barometer capability
///
/// Implementations must not retry internally; the scheduler retries this
/// family inline (bounded count, fixed spacing) before accepting a degraded
/// zeroed reading.
pub trait BaroSensor {
    /// Probe the sensor
    fn init(&mut self) -> Result<(), SensorError>;

    /// Take one sample
    fn read(&mut self) -> Result<BaroReading, SensorError>;
}
