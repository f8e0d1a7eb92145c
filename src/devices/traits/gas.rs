//! Gas concentration array trait (Aux stream)

use super::SensorError;

/// Number of gas channels in the array
pub const GAS_CHANNELS: usize = 8;

/// One sample from the gas concentration array
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GasReading {
    /// Per-channel concentrations, ppm
    pub channels: [f32; GAS_CHANNELS],
}

impl GasReading {
    /// All-zero reading, logged in place of a failed sample
    pub const fn zeroed() -> Self {
        Self {
            channels: [0.0; GAS_CHANNELS],
        }
    }
}

/// Gas array capability
pub trait GasArraySensor {
    /// Probe the array
    fn init(&mut self) -> Result<(), SensorError>;

    /// Take one sample across all channels
    fn read(&mut self) -> Result<GasReading, SensorError>;
}
